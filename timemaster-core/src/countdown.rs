const MAX_HOURS: i64 = 99;
const MAX_MINUTES: i64 = 59;
const MAX_SECONDS: i64 = 59;

/// Countdown engine. Remaining time counts down to exactly 0, one
/// whole second per tick, and never goes negative. `running` and
/// `completed` are never both true.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Countdown {
    hours: u32,
    minutes: u32,
    seconds: u32,
    remaining_secs: u64,
    running: bool,
    completed: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            remaining_secs: 0,
            running: false,
            completed: false,
        }
    }

    /// Rebuild a countdown from persisted state. A countdown saved
    /// while running is debited the whole seconds that passed since
    /// the save instant, floored at 0; hitting 0 through the debit
    /// marks it completed. The restored engine is always paused.
    pub fn restore(
        hours: i64,
        minutes: i64,
        seconds: i64,
        remaining_secs: u64,
        was_running: bool,
        gap_ms: u64,
    ) -> Self {
        let mut remaining = remaining_secs;
        let mut completed = false;
        if was_running {
            remaining = remaining.saturating_sub(gap_ms / 1000);
            completed = remaining == 0;
        }
        Self {
            hours: clamp_field(hours, MAX_HOURS),
            minutes: clamp_field(minutes, MAX_MINUTES),
            seconds: clamp_field(seconds, MAX_SECONDS),
            remaining_secs: remaining,
            running: false,
            completed,
        }
    }

    /// Set the duration input fields, each clamped to its valid range
    /// independently (hours 0-99, minutes/seconds 0-59). Legal only
    /// while idle with nothing on the clock.
    pub fn configure(&mut self, hours: i64, minutes: i64, seconds: i64) {
        if self.running || self.remaining_secs != 0 {
            return;
        }
        self.hours = clamp_field(hours, MAX_HOURS);
        self.minutes = clamp_field(minutes, MAX_MINUTES);
        self.seconds = clamp_field(seconds, MAX_SECONDS);
    }

    /// Hour/minute/second input fields as currently displayed.
    pub fn fields(&self) -> (u32, u32, u32) {
        (self.hours, self.minutes, self.seconds)
    }

    pub fn configured_secs(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Start a fresh run from the configured duration, or resume a
    /// paused one. Returns true when a tick should be scheduled.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        if self.remaining_secs == 0 {
            let configured = self.configured_secs();
            if configured == 0 {
                return false;
            }
            self.remaining_secs = configured;
        }
        self.completed = false;
        self.running = true;
        true
    }

    /// Apply one whole-second tick. Returns true exactly when this
    /// tick completed the run; a completed or paused countdown never
    /// re-fires.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            self.completed = true;
            return true;
        }
        false
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Clear the run. The configured input fields are left untouched;
    /// reset clears the clock, not the user's input.
    pub fn reset(&mut self) {
        self.remaining_secs = 0;
        self.running = false;
        self.completed = false;
    }

    /// End of the completion display window.
    pub fn clear_completed(&mut self) {
        self.completed = false;
    }

    /// Add preset seconds to the clock and back-fill the input fields
    /// from the new total so the display stays consistent. Ignored
    /// while running.
    pub fn add_preset(&mut self, secs: u64) {
        if self.running {
            return;
        }
        self.remaining_secs = self.remaining_secs.saturating_add(secs);
        self.completed = false;
        self.hours = (self.remaining_secs / 3600) as u32;
        self.minutes = ((self.remaining_secs % 3600) / 60) as u32;
        self.seconds = (self.remaining_secs % 60) as u32;
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_field(value: i64, max: i64) -> u32 {
    value.clamp(0, max) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_clamps_each_field() {
        let mut cd = Countdown::new();
        cd.configure(25, 70, -5);
        assert_eq!(cd.fields(), (25, 59, 0));
        assert_eq!(cd.configured_secs(), 25 * 3600 + 59 * 60);
    }

    #[test]
    fn test_configure_illegal_with_time_on_clock() {
        let mut cd = Countdown::new();
        cd.configure(0, 0, 10);
        cd.start();
        cd.pause();
        assert_eq!(cd.remaining_secs(), 10);
        cd.configure(1, 0, 0);
        assert_eq!(cd.fields(), (0, 0, 10));
    }

    #[test]
    fn test_start_copies_configured_duration() {
        let mut cd = Countdown::new();
        assert!(!cd.start()); // Nothing configured
        cd.configure(0, 1, 30);
        assert!(cd.start());
        assert!(cd.is_running());
        assert_eq!(cd.remaining_secs(), 90);
    }

    #[test]
    fn test_pause_and_resume_keep_remaining() {
        let mut cd = Countdown::new();
        cd.configure(0, 0, 5);
        cd.start();
        cd.tick();
        cd.pause();
        assert!(!cd.is_running());
        assert_eq!(cd.remaining_secs(), 4);
        assert!(cd.start()); // Resume path, not a fresh copy
        assert_eq!(cd.remaining_secs(), 4);
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let mut cd = Countdown::new();
        cd.configure(0, 0, 2);
        cd.start();
        assert!(!cd.tick());
        assert!(cd.tick()); // Reaches 0
        assert!(cd.is_completed());
        assert!(!cd.is_running());
        assert!(!cd.tick()); // No re-fire while still at 0
        assert!(!cd.tick());
        assert_eq!(cd.remaining_secs(), 0);
    }

    #[test]
    fn test_running_and_completed_never_both_true() {
        let mut cd = Countdown::new();
        cd.configure(0, 0, 1);
        cd.start();
        cd.tick();
        assert!(cd.is_completed() && !cd.is_running());
        cd.start(); // New run supersedes the completed window
        assert!(cd.is_running() && !cd.is_completed());
    }

    #[test]
    fn test_reset_keeps_input_fields() {
        let mut cd = Countdown::new();
        cd.configure(1, 2, 3);
        cd.start();
        cd.tick();
        cd.reset();
        assert_eq!(cd.remaining_secs(), 0);
        assert!(!cd.is_running());
        assert!(!cd.is_completed());
        assert_eq!(cd.fields(), (1, 2, 3));
    }

    #[test]
    fn test_add_preset_backfills_fields() {
        let mut cd = Countdown::new();
        cd.add_preset(30);
        cd.add_preset(600);
        assert_eq!(cd.remaining_secs(), 630);
        assert_eq!(cd.fields(), (0, 10, 30));
    }

    #[test]
    fn test_add_preset_ignored_while_running() {
        let mut cd = Countdown::new();
        cd.configure(0, 0, 5);
        cd.start();
        cd.add_preset(30);
        assert_eq!(cd.remaining_secs(), 5);
    }

    #[test]
    fn test_restore_debits_gap_and_completes() {
        // Saved running with 5s remaining, reloaded 20s later.
        let cd = Countdown::restore(0, 0, 5, 5, true, 20_000);
        assert_eq!(cd.remaining_secs(), 0);
        assert!(cd.is_completed());
        assert!(!cd.is_running());
    }

    #[test]
    fn test_restore_partial_gap() {
        let cd = Countdown::restore(0, 1, 0, 60, true, 20_500);
        assert_eq!(cd.remaining_secs(), 40);
        assert!(!cd.is_completed());
        assert!(!cd.is_running());
    }

    #[test]
    fn test_restore_paused_ignores_gap() {
        let cd = Countdown::restore(0, 0, 30, 12, false, 60_000);
        assert_eq!(cd.remaining_secs(), 12);
        assert!(!cd.is_completed());
    }
}
