use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use timemaster_core::{Countdown, Lap, Stopwatch};

const KEY_STOPWATCH: &str = "stopwatch";
const KEY_TIMER: &str = "timer";
const KEY_DARK_MODE: &str = "darkMode";

#[derive(Serialize, Deserialize)]
struct LapRecord {
    number: u32,
    split_ms: u64,
    cumulative_ms: u64,
}

#[derive(Serialize, Deserialize)]
struct StopwatchSnapshot {
    running: bool,
    elapsed_ms: u64,
    laps: Vec<LapRecord>,
    saved_at_ms: u64,
}

#[derive(Serialize, Deserialize)]
struct CountdownSnapshot {
    running: bool,
    remaining_secs: u64,
    hours: u32,
    minutes: u32,
    seconds: u32,
    saved_at_ms: u64,
}

/// Durable key/value snapshot store, one file per key under the data
/// directory. Writes are best-effort: a failed or malformed read
/// behaves as "no prior state" and a failed write is logged, never
/// propagated.
pub struct TimerStorage {
    dir: PathBuf,
}

impl TimerStorage {
    pub fn new(dir: PathBuf) -> Self {
        if let Err(err) = fs::create_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), %err, "could not create data dir");
        }
        Self { dir }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    fn write_key(&self, key: &str, value: &str) {
        if let Err(err) = fs::write(self.dir.join(key), value) {
            tracing::warn!(key, %err, "failed to persist snapshot");
        }
    }

    fn delete_key(&self, key: &str) {
        // Missing key is fine; reset of a never-saved engine.
        let _ = fs::remove_file(self.dir.join(key));
    }

    /// Load the stopwatch, reconciling elapsed time across the gap
    /// since the snapshot was written. Always restored paused.
    pub fn load_stopwatch(&self, now_ms: u64) -> Stopwatch {
        let Some(raw) = self.read_key(KEY_STOPWATCH) else {
            return Stopwatch::new();
        };
        match serde_json::from_str::<StopwatchSnapshot>(&raw) {
            Ok(snap) => {
                let gap_ms = now_ms.saturating_sub(snap.saved_at_ms);
                let laps = snap
                    .laps
                    .into_iter()
                    .map(|lap| Lap {
                        number: lap.number,
                        split_ms: lap.split_ms,
                        cumulative_ms: lap.cumulative_ms,
                    })
                    .collect();
                Stopwatch::restore(snap.elapsed_ms, laps, snap.running, gap_ms)
            }
            Err(err) => {
                tracing::warn!(%err, "malformed stopwatch snapshot, starting fresh");
                Stopwatch::new()
            }
        }
    }

    pub fn save_stopwatch(&self, stopwatch: &Stopwatch, now_ms: u64) {
        let snap = StopwatchSnapshot {
            running: stopwatch.is_running(),
            elapsed_ms: stopwatch.elapsed_ms(now_ms),
            laps: stopwatch
                .laps()
                .iter()
                .map(|lap| LapRecord {
                    number: lap.number,
                    split_ms: lap.split_ms,
                    cumulative_ms: lap.cumulative_ms,
                })
                .collect(),
            saved_at_ms: now_ms,
        };
        match serde_json::to_string(&snap) {
            Ok(raw) => self.write_key(KEY_STOPWATCH, &raw),
            Err(err) => tracing::warn!(%err, "failed to serialize stopwatch"),
        }
    }

    /// Explicit stopwatch reset drops the snapshot entirely.
    pub fn clear_stopwatch(&self) {
        self.delete_key(KEY_STOPWATCH);
    }

    /// Load the countdown, debiting whole seconds that passed since
    /// the snapshot was written. Always restored paused; a
    /// gap-induced completion replays no tone.
    pub fn load_countdown(&self, now_ms: u64) -> Countdown {
        let Some(raw) = self.read_key(KEY_TIMER) else {
            return Countdown::new();
        };
        match serde_json::from_str::<CountdownSnapshot>(&raw) {
            Ok(snap) => {
                let gap_ms = now_ms.saturating_sub(snap.saved_at_ms);
                Countdown::restore(
                    i64::from(snap.hours),
                    i64::from(snap.minutes),
                    i64::from(snap.seconds),
                    snap.remaining_secs,
                    snap.running,
                    gap_ms,
                )
            }
            Err(err) => {
                tracing::warn!(%err, "malformed countdown snapshot, starting fresh");
                Countdown::new()
            }
        }
    }

    pub fn save_countdown(&self, countdown: &Countdown, now_ms: u64) {
        let (hours, minutes, seconds) = countdown.fields();
        let snap = CountdownSnapshot {
            running: countdown.is_running(),
            remaining_secs: countdown.remaining_secs(),
            hours,
            minutes,
            seconds,
            saved_at_ms: now_ms,
        };
        match serde_json::to_string(&snap) {
            Ok(raw) => self.write_key(KEY_TIMER, &raw),
            Err(err) => tracing::warn!(%err, "failed to serialize countdown"),
        }
    }

    pub fn load_dark_mode(&self) -> bool {
        self.read_key(KEY_DARK_MODE)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(false)
    }

    pub fn save_dark_mode(&self, dark: bool) {
        self.write_key(KEY_DARK_MODE, if dark { "true" } else { "false" });
    }
}
