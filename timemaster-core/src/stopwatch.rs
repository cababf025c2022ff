/// A recorded lap. Never mutated after creation; laps are only
/// appended, or cleared en masse on reset.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lap {
    /// 1-based, consecutive.
    pub number: u32,
    /// Portion of elapsed time attributable to this lap alone.
    pub split_ms: u64,
    /// Total elapsed time at the moment the lap was recorded.
    pub cumulative_ms: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

/// Stopwatch engine. Elapsed time while running is always
/// `now - anchor`; the anchor is recomputed on every resume as
/// `now - elapsed`, so pausing and resuming never loses accuracy.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Stopwatch {
    running: bool,
    elapsed_ms: u64,
    anchor_ms: Option<u64>,
    laps: Vec<Lap>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            running: false,
            elapsed_ms: 0,
            anchor_ms: None,
            laps: Vec::new(),
        }
    }

    /// Rebuild a stopwatch from persisted state. A stopwatch saved
    /// while running is credited the gap since the save instant; the
    /// restored engine is always paused, never auto-resumed.
    pub fn restore(elapsed_ms: u64, laps: Vec<Lap>, was_running: bool, gap_ms: u64) -> Self {
        let elapsed = if was_running {
            elapsed_ms.saturating_add(gap_ms)
        } else {
            elapsed_ms
        };
        Self {
            running: false,
            elapsed_ms: elapsed,
            anchor_ms: None,
            laps,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::Running
        } else if self.elapsed_ms == 0 && self.laps.is_empty() {
            Phase::Idle
        } else {
            Phase::Paused
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.running {
            return;
        }
        self.anchor_ms = Some(now_ms.saturating_sub(self.elapsed_ms));
        self.running = true;
    }

    pub fn pause(&mut self, now_ms: u64) {
        if !self.running {
            return;
        }
        self.elapsed_ms = self.elapsed_ms(now_ms);
        self.anchor_ms = None;
        self.running = false;
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.anchor_ms {
            Some(anchor) if self.running => now_ms.saturating_sub(anchor),
            _ => self.elapsed_ms,
        }
    }

    /// Record a lap at the current elapsed time. Silently ignored
    /// unless running.
    pub fn lap(&mut self, now_ms: u64) {
        if !self.running {
            return;
        }
        let cumulative = self.elapsed_ms(now_ms);
        let previous = self.laps.last().map_or(0, |lap| lap.cumulative_ms);
        self.laps.push(Lap {
            number: self.laps.len() as u32 + 1,
            split_ms: cumulative.saturating_sub(previous),
            cumulative_ms: cumulative,
        });
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices of the fastest and slowest laps by split duration.
///
/// Fewer than two laps has no meaningful comparison and yields `None`.
/// Ties resolve to the first occurrence in insertion order.
pub fn fastest_and_slowest(laps: &[Lap]) -> Option<(usize, usize)> {
    if laps.len() < 2 {
        return None;
    }
    let mut fastest = 0;
    let mut slowest = 0;
    for (i, lap) in laps.iter().enumerate() {
        if lap.split_ms < laps[fastest].split_ms {
            fastest = i;
        }
        if lap.split_ms > laps[slowest].split_ms {
            slowest = i;
        }
    }
    Some((fastest, slowest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_pause_elapsed() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.phase(), Phase::Idle);
        assert_eq!(sw.elapsed_ms(0), 0);

        sw.start(1000);
        assert_eq!(sw.phase(), Phase::Running);
        assert_eq!(sw.elapsed_ms(1500), 500);
        assert_eq!(sw.elapsed_ms(2000), 1000);

        sw.pause(2000);
        assert_eq!(sw.phase(), Phase::Paused);
        assert_eq!(sw.elapsed_ms(5000), 1000); // Frozen while paused

        sw.start(5000);
        assert_eq!(sw.elapsed_ms(5500), 1500);

        sw.reset();
        assert_eq!(sw.phase(), Phase::Idle);
        assert_eq!(sw.elapsed_ms(10_000), 0);
    }

    #[test]
    fn test_elapsed_is_sum_of_running_intervals() {
        // Drift-free: elapsed after pause equals the sum of each
        // running interval, regardless of how ticks were scheduled.
        let mut sw = Stopwatch::new();
        sw.start(100);
        sw.pause(350); // 250
        sw.start(1000);
        sw.pause(1005); // 5
        sw.start(40_000);
        sw.pause(41_745); // 1745
        assert_eq!(sw.elapsed_ms(99_999), 2000);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.start(5000); // Must not move the anchor
        assert_eq!(sw.elapsed_ms(6000), 6000);
    }

    #[test]
    fn test_lap_split_and_cumulative() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.lap(5000);
        sw.lap(8000);
        sw.lap(8500);

        let laps = sw.laps();
        assert_eq!(laps.len(), 3);
        assert_eq!(laps[0], Lap { number: 1, split_ms: 5000, cumulative_ms: 5000 });
        assert_eq!(laps[1], Lap { number: 2, split_ms: 3000, cumulative_ms: 8000 });
        assert_eq!(laps[2], Lap { number: 3, split_ms: 500, cumulative_ms: 8500 });

        let split_sum: u64 = laps.iter().map(|lap| lap.split_ms).sum();
        assert_eq!(split_sum, laps.last().unwrap().cumulative_ms);
    }

    #[test]
    fn test_lap_while_paused_is_noop() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.lap(1000);
        sw.pause(2000);
        sw.lap(3000);
        assert_eq!(sw.laps().len(), 1);
    }

    #[test]
    fn test_lap_while_idle_is_noop() {
        let mut sw = Stopwatch::new();
        sw.lap(1000);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_reset_clears_laps() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.lap(1000);
        sw.reset();
        assert!(sw.laps().is_empty());
        assert_eq!(sw, Stopwatch::new());
    }

    #[test]
    fn test_fastest_and_slowest_too_few_laps() {
        assert_eq!(fastest_and_slowest(&[]), None);
        let one = [Lap { number: 1, split_ms: 5, cumulative_ms: 5 }];
        assert_eq!(fastest_and_slowest(&one), None);
    }

    #[test]
    fn test_fastest_and_slowest_ties_keep_first() {
        let splits = [5u64, 2, 8, 2];
        let mut cumulative = 0;
        let laps: Vec<Lap> = splits
            .iter()
            .enumerate()
            .map(|(i, &split)| {
                cumulative += split;
                Lap { number: i as u32 + 1, split_ms: split, cumulative_ms: cumulative }
            })
            .collect();
        assert_eq!(fastest_and_slowest(&laps), Some((1, 2)));
    }

    #[test]
    fn test_restore_credits_gap_when_running() {
        // Saved running with 10s on the clock, reloaded 7s later.
        let sw = Stopwatch::restore(10_000, Vec::new(), true, 7_000);
        assert_eq!(sw.phase(), Phase::Paused);
        assert_eq!(sw.elapsed_ms(123_456), 17_000);
    }

    #[test]
    fn test_restore_paused_ignores_gap() {
        let sw = Stopwatch::restore(10_000, Vec::new(), false, 7_000);
        assert_eq!(sw.elapsed_ms(0), 10_000);
        assert_eq!(sw.phase(), Phase::Paused);
    }

    #[test]
    fn test_restore_keeps_laps() {
        let laps = vec![Lap { number: 1, split_ms: 4, cumulative_ms: 4 }];
        let sw = Stopwatch::restore(4, laps.clone(), false, 0);
        assert_eq!(sw.laps(), laps.as_slice());
    }
}
