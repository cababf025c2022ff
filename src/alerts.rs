use std::io::{self, Write};

/// A one-shot alert tone request. Frequency and duration describe the
/// intended tone; a sink without a synthesizer may approximate it.
#[derive(Clone, Copy, Debug)]
pub struct ToneRequest {
    pub frequency_hz: u32,
    pub duration_ms: u64,
}

/// Tone emitted when a countdown reaches zero.
pub const COMPLETION_TONE: ToneRequest = ToneRequest {
    frequency_hz: 800,
    duration_ms: 500,
};

/// Fire an alert tone. Fire-and-forget: failures are logged and never
/// surfaced to the engines.
pub fn fire_alert(tone: ToneRequest) {
    // The terminal bell is the closest host capability to a raw tone.
    let mut out = io::stdout();
    if out.write_all(b"\x07").and_then(|()| out.flush()).is_err() {
        tracing::warn!("could not ring terminal bell");
    }
    tracing::debug!(
        frequency_hz = tone.frequency_hz,
        duration_ms = tone.duration_ms,
        "alert tone requested"
    );
}
