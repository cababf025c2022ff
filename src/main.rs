mod alerts;
mod clock;
mod control;
mod error;
mod input;
mod logger;
mod storage;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use crossterm::{cursor, execute, terminal};
use timemaster_core::{Countdown, Stopwatch};

use crate::alerts::{fire_alert, COMPLETION_TONE};
use crate::control::{Command, Mode};
use crate::error::{AppError, AppResult};
use crate::storage::TimerStorage;

/// Display refresh cadence while the stopwatch runs.
const STOPWATCH_TICK: Duration = Duration::from_millis(10);
/// Whole-second decrement cadence for the countdown.
const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
/// How long the completion flash stays on screen.
const COMPLETED_WINDOW: Duration = Duration::from_secs(3);
/// Poll timeout when no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum ModeArg {
    Stopwatch,
    Timer,
}

#[derive(Parser, Debug)]
#[command(name = "timemaster", about = "Interruption-safe stopwatch and countdown timer")]
struct Args {
    /// Directory holding persisted timer state.
    #[arg(long, env = "TIMEMASTER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// View to open at startup.
    #[arg(long, value_enum, default_value = "stopwatch")]
    mode: ModeArg,

    /// Verbose logging (stderr).
    #[arg(short, long)]
    verbose: bool,
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".timemaster")
}

struct App {
    storage: TimerStorage,
    mode: Mode,
    dark_mode: bool,
    stopwatch: Stopwatch,
    countdown: Countdown,
    // Cancelable tick handles: at most one pending tick per engine.
    // Cleared on pause/reset/completion so a canceled tick's effect
    // is never observed.
    stopwatch_tick: Option<Instant>,
    countdown_tick: Option<Instant>,
    completed_clear: Option<Instant>,
}

impl App {
    fn new(storage: TimerStorage, mode: Mode) -> Self {
        let now = clock::now_ms();
        let stopwatch = storage.load_stopwatch(now);
        let countdown = storage.load_countdown(now);
        let dark_mode = storage.load_dark_mode();
        tracing::info!(
            ?mode,
            stopwatch_elapsed_ms = stopwatch.elapsed_ms(now),
            countdown_remaining_secs = countdown.remaining_secs(),
            "restored state"
        );
        // A gap-induced completion still gets its bounded display
        // window, but no tone is replayed for it.
        let completed_clear = countdown
            .is_completed()
            .then(|| Instant::now() + COMPLETED_WINDOW);
        Self {
            storage,
            mode,
            dark_mode,
            stopwatch,
            countdown,
            stopwatch_tick: None,
            countdown_tick: None,
            completed_clear,
        }
    }

    /// Execute a resolved command. Returns false when the app should
    /// quit. Every state change writes a snapshot before returning.
    fn apply(&mut self, command: Command) -> bool {
        let now = clock::now_ms();
        match command {
            Command::StartStopwatch => {
                self.stopwatch.start(now);
                self.stopwatch_tick = Some(Instant::now() + STOPWATCH_TICK);
                self.storage.save_stopwatch(&self.stopwatch, now);
            }
            Command::PauseStopwatch => {
                self.stopwatch.pause(now);
                self.stopwatch_tick = None;
                self.storage.save_stopwatch(&self.stopwatch, now);
            }
            Command::Lap => {
                self.stopwatch.lap(now);
                self.storage.save_stopwatch(&self.stopwatch, now);
            }
            Command::ResetStopwatch => {
                self.stopwatch.reset();
                self.stopwatch_tick = None;
                // Explicit reset is the one path that deletes the
                // stopwatch snapshot instead of overwriting it.
                self.storage.clear_stopwatch();
            }
            Command::StartCountdown => {
                if self.countdown.start() {
                    self.countdown_tick = Some(Instant::now() + COUNTDOWN_TICK);
                    self.completed_clear = None;
                }
                self.storage.save_countdown(&self.countdown, now);
            }
            Command::PauseCountdown => {
                self.countdown.pause();
                self.countdown_tick = None;
                self.storage.save_countdown(&self.countdown, now);
            }
            Command::ResetCountdown => {
                self.countdown.reset();
                self.countdown_tick = None;
                self.completed_clear = None;
                self.storage.save_countdown(&self.countdown, now);
            }
            Command::AddPreset(secs) => {
                self.countdown.add_preset(secs);
                self.completed_clear = None;
                self.storage.save_countdown(&self.countdown, now);
            }
            Command::AdjustHours(delta) => {
                let (h, m, s) = self.countdown.fields();
                self.countdown
                    .configure(i64::from(h) + delta, i64::from(m), i64::from(s));
                self.storage.save_countdown(&self.countdown, now);
            }
            Command::AdjustMinutes(delta) => {
                let (h, m, s) = self.countdown.fields();
                self.countdown
                    .configure(i64::from(h), i64::from(m) + delta, i64::from(s));
                self.storage.save_countdown(&self.countdown, now);
            }
            Command::AdjustSeconds(delta) => {
                let (h, m, s) = self.countdown.fields();
                self.countdown
                    .configure(i64::from(h), i64::from(m), i64::from(s) + delta);
                self.storage.save_countdown(&self.countdown, now);
            }
            Command::SwitchMode => {
                self.mode = self.mode.toggled();
            }
            Command::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                self.storage.save_dark_mode(self.dark_mode);
            }
            Command::Quit => return false,
        }
        true
    }

    /// Fire any tick whose deadline has passed. Re-entered from the
    /// event loop; each handle is checked against current state before
    /// its effect is applied.
    fn service_ticks(&mut self, wake: Instant) {
        if let Some(deadline) = self.stopwatch_tick {
            if wake >= deadline {
                // Display refresh only; elapsed is derived from the
                // anchor at draw time, never from tick deltas, so
                // rescheduling from the wake instant loses nothing.
                self.stopwatch_tick = if self.stopwatch.is_running() {
                    Some(wake + STOPWATCH_TICK)
                } else {
                    None
                };
            }
        }

        if let Some(deadline) = self.countdown_tick {
            if wake >= deadline {
                let completed = self.countdown.tick();
                let now = clock::now_ms();
                self.storage.save_countdown(&self.countdown, now);
                if completed {
                    self.countdown_tick = None;
                    self.completed_clear = Some(wake + COMPLETED_WINDOW);
                    fire_alert(COMPLETION_TONE);
                    tracing::info!("countdown completed");
                } else if self.countdown.is_running() {
                    // Fixed cadence from the previous deadline, so a
                    // late wake-up does not stretch the second.
                    self.countdown_tick = Some(deadline + COUNTDOWN_TICK);
                } else {
                    self.countdown_tick = None;
                }
            }
        }

        if let Some(deadline) = self.completed_clear {
            if wake >= deadline {
                self.completed_clear = None;
                if self.countdown.is_completed() {
                    self.countdown.clear_completed();
                    self.storage.save_countdown(&self.countdown, clock::now_ms());
                }
            }
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        [self.stopwatch_tick, self.countdown_tick, self.completed_clear]
            .into_iter()
            .flatten()
            .min()
    }
}

struct TerminalGuard;

impl TerminalGuard {
    fn setup() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn run(app: &mut App) -> AppResult<()> {
    let _guard = TerminalGuard::setup()?;
    let mut out = io::stdout();

    loop {
        ui::draw(
            &mut out,
            app.mode,
            &app.stopwatch,
            &app.countdown,
            clock::now_ms(),
            app.dark_mode,
        )?;

        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) => {
                    if let Some(key) = input::map_key(&key_event) {
                        let command = control::resolve(key, app.mode, &app.stopwatch, &app.countdown);
                        tracing::debug!(?key, ?command, "key resolved");
                        if let Some(command) = command {
                            if !app.apply(command) {
                                break;
                            }
                        }
                    }
                }
                Event::Resize(..) => {} // Redrawn at the top of the loop
                _ => {}
            }
        }

        app.service_ticks(Instant::now());
    }
    Ok(())
}

fn main() -> AppResult<()> {
    let args = Args::parse();
    logger::init_logging(args.verbose);

    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    if data_dir.is_file() {
        return Err(AppError::Message(format!(
            "data dir {} is a regular file",
            data_dir.display()
        )));
    }
    let storage = TimerStorage::new(data_dir);
    let mode = match args.mode {
        ModeArg::Stopwatch => Mode::Stopwatch,
        ModeArg::Timer => Mode::Countdown,
    };

    // Engines still running at exit stay "running" in their last
    // snapshot; the next startup credits or debits the gap and
    // restores them paused.
    let mut app = App::new(storage, mode);
    run(&mut app)
}
