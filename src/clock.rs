use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock instant as Unix epoch milliseconds.
///
/// Engines derive elapsed and remaining time from instants taken here;
/// snapshots store the same value so a restart can reconcile the gap.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
