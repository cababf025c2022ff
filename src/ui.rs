use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use timemaster_core::{fastest_and_slowest, format_hms, format_hms_cs, Countdown, Phase, Stopwatch};

use crate::control::Mode;

const MAX_LAP_ROWS: usize = 12;

/// Theme colors for the light/dark flag persisted under "darkMode".
struct Theme {
    text: Color,
    dim: Color,
    accent: Color,
}

fn theme(dark: bool) -> Theme {
    if dark {
        Theme { text: Color::White, dim: Color::DarkGrey, accent: Color::Cyan }
    } else {
        Theme { text: Color::Black, dim: Color::Grey, accent: Color::Blue }
    }
}

/// Redraw the whole screen. Purely a display refresh: every value
/// shown is recomputed from engine state and `now_ms`.
pub fn draw(
    out: &mut impl Write,
    mode: Mode,
    stopwatch: &Stopwatch,
    countdown: &Countdown,
    now_ms: u64,
    dark: bool,
) -> io::Result<()> {
    let colors = theme(dark);
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0), ResetColor)?;

    queue!(
        out,
        SetForegroundColor(colors.accent),
        Print("TIME MASTER"),
        SetForegroundColor(colors.dim),
        Print(match mode {
            Mode::Stopwatch => "   [Stopwatch]  Countdown ",
            Mode::Countdown => "    Stopwatch  [Countdown]",
        }),
        Print(if dark { "   (dark)" } else { "" }),
        cursor::MoveToNextLine(2),
    )?;

    match mode {
        Mode::Stopwatch => draw_stopwatch(out, stopwatch, now_ms, &colors)?,
        Mode::Countdown => draw_countdown(out, countdown, &colors)?,
    }

    let (_, rows) = terminal::size()?;
    queue!(
        out,
        cursor::MoveTo(0, rows.saturating_sub(1)),
        SetForegroundColor(colors.dim),
        Print(footer(mode)),
        ResetColor,
    )?;
    out.flush()
}

fn footer(mode: Mode) -> &'static str {
    match mode {
        Mode::Stopwatch => "space start/pause  l lap  r reset  tab mode  d theme  q quit",
        Mode::Countdown => {
            "space start/pause  r reset  h/m/s +field (shift -)  1-4 presets  tab mode  d theme  q quit"
        }
    }
}

fn draw_stopwatch(
    out: &mut impl Write,
    stopwatch: &Stopwatch,
    now_ms: u64,
    colors: &Theme,
) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(colors.text),
        Print(format!("  {}", format_hms_cs(stopwatch.elapsed_ms(now_ms)))),
        SetForegroundColor(colors.dim),
        Print(match stopwatch.phase() {
            Phase::Running => "  running",
            Phase::Paused => "  paused",
            Phase::Idle => "",
        }),
        cursor::MoveToNextLine(2),
    )?;

    let laps = stopwatch.laps();
    if laps.is_empty() {
        return Ok(());
    }
    let extremes = fastest_and_slowest(laps);
    queue!(
        out,
        SetForegroundColor(colors.dim),
        Print("   #   lap time      total time"),
        cursor::MoveToNextLine(1),
    )?;
    // Newest laps stay visible when the table outgrows the screen.
    let skip = laps.len().saturating_sub(MAX_LAP_ROWS);
    for (i, lap) in laps.iter().enumerate().skip(skip) {
        let color = match extremes {
            Some((fastest, _)) if i == fastest => Color::Green,
            Some((_, slowest)) if i == slowest => Color::Red,
            _ => colors.text,
        };
        queue!(
            out,
            SetForegroundColor(color),
            Print(format!(
                "  {:2}   {}   {}",
                lap.number,
                format_hms_cs(lap.split_ms),
                format_hms_cs(lap.cumulative_ms)
            )),
            cursor::MoveToNextLine(1),
        )?;
    }
    Ok(())
}

fn draw_countdown(out: &mut impl Write, countdown: &Countdown, colors: &Theme) -> io::Result<()> {
    let time_color = if countdown.is_completed() {
        // Completion flash for the 3-second display window.
        Color::Red
    } else {
        colors.text
    };
    queue!(
        out,
        SetForegroundColor(time_color),
        Print(format!("  {}", format_hms(countdown.remaining_secs()))),
        SetForegroundColor(colors.dim),
        Print(if countdown.is_completed() {
            "  TIME'S UP"
        } else if countdown.is_running() {
            "  running"
        } else if countdown.remaining_secs() > 0 {
            "  paused"
        } else {
            ""
        }),
        cursor::MoveToNextLine(2),
    )?;

    if !countdown.is_running() {
        let (hours, minutes, seconds) = countdown.fields();
        queue!(
            out,
            SetForegroundColor(colors.text),
            Print(format!(
                "  set  {:02}h {:02}m {:02}s",
                hours, minutes, seconds
            )),
            cursor::MoveToNextLine(1),
            SetForegroundColor(colors.dim),
            Print("  presets  [1] +30s  [2] +1m  [3] +5m  [4] +10m"),
            cursor::MoveToNextLine(1),
        )?;
    }
    Ok(())
}
