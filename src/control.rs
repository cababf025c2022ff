use timemaster_core::{Countdown, Stopwatch};

use crate::input::Key;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Stopwatch,
    Countdown,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Stopwatch => Mode::Countdown,
            Mode::Countdown => Mode::Stopwatch,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    StartStopwatch,
    PauseStopwatch,
    Lap,
    ResetStopwatch,
    StartCountdown,
    PauseCountdown,
    ResetCountdown,
    AddPreset(u64),
    AdjustHours(i64),
    AdjustMinutes(i64),
    AdjustSeconds(i64),
    SwitchMode,
    ToggleDarkMode,
    Quit,
}

/// Resolve a logical key against the current mode and engine state.
///
/// The resolver is consulted fresh on every key press, so it always
/// observes current `running`/`remaining` values. Keys that are
/// illegal in the current state resolve to `None` and are dropped
/// silently; lapping while paused is a no-op, not an error.
pub fn resolve(key: Key, mode: Mode, stopwatch: &Stopwatch, countdown: &Countdown) -> Option<Command> {
    match (mode, key) {
        (_, Key::Quit) => Some(Command::Quit),
        (_, Key::Tab) => Some(Command::SwitchMode),
        (_, Key::KeyD) => Some(Command::ToggleDarkMode),

        (Mode::Stopwatch, Key::Space) => Some(if stopwatch.is_running() {
            Command::PauseStopwatch
        } else {
            Command::StartStopwatch
        }),
        (Mode::Stopwatch, Key::KeyL) if stopwatch.is_running() => Some(Command::Lap),
        (Mode::Stopwatch, Key::KeyR) => Some(Command::ResetStopwatch),

        (Mode::Countdown, Key::Space) => {
            if countdown.is_running() {
                Some(Command::PauseCountdown)
            } else if countdown.remaining_secs() > 0 || countdown.configured_secs() > 0 {
                Some(Command::StartCountdown)
            } else {
                None
            }
        }
        (Mode::Countdown, Key::KeyR) => Some(Command::ResetCountdown),
        (Mode::Countdown, Key::Preset(secs)) if !countdown.is_running() => {
            Some(Command::AddPreset(secs))
        }
        (Mode::Countdown, Key::Hours(delta)) if fields_editable(countdown) => {
            Some(Command::AdjustHours(delta))
        }
        (Mode::Countdown, Key::Minutes(delta)) if fields_editable(countdown) => {
            Some(Command::AdjustMinutes(delta))
        }
        (Mode::Countdown, Key::Seconds(delta)) if fields_editable(countdown) => {
            Some(Command::AdjustSeconds(delta))
        }

        _ => None,
    }
}

fn fields_editable(countdown: &Countdown) -> bool {
    !countdown.is_running() && countdown.remaining_secs() == 0
}
