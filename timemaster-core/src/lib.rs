//! Pure timing logic with no platform dependencies.
//!
//! Elapsed and remaining time are always derived from a wall-clock
//! anchor handed in by the caller, never from accumulated tick deltas,
//! so delayed or dropped ticks cannot introduce drift.

mod countdown;
mod stopwatch;

pub use countdown::Countdown;
pub use stopwatch::{fastest_and_slowest, Lap, Phase, Stopwatch};

/// Format milliseconds as "HH:MM:SS.CC" (centiseconds).
///
/// Hours widen past two digits only above 99 hours.
pub fn format_hms_cs(ms: u64) -> String {
    let total_secs = ms / 1000;
    let cs = (ms % 1000) / 10;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}.{:02}", h, m, s, cs)
}

/// Format whole seconds as "HH:MM:SS".
pub fn format_hms(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
