//! Terminal render and chime hooks.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event as TermEvent, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use pomoflow_core::settings::hex_to_rgb;
use pomoflow_core::{NotifyError, SessionHooks, SessionView, Theme, TimerMode};
use tokio::sync::mpsc;
use tracing::warn;

const BELL: &[u8] = b"\x07";

/// Draws the session on a single line, recolored from the settings theme.
pub struct TerminalHooks<W: Write> {
    out: W,
    background: Color,
    foreground: Color,
}

impl<W: Write> TerminalHooks<W> {
    pub fn new(out: W, theme: &Theme) -> Self {
        let mut hooks = Self {
            out,
            background: Color::Reset,
            foreground: Color::Reset,
        };
        hooks.set_theme(theme);
        hooks
    }

    pub fn set_theme(&mut self, theme: &Theme) {
        self.background = rgb_color(&theme.background);
        self.foreground = rgb_color(&theme.text);
    }

    /// Leave the status line and move to a fresh one.
    pub fn finish(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Print("\r\n"))?;
        self.out.flush()
    }

    fn draw(&mut self, view: &SessionView) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            SetBackgroundColor(self.background),
            SetForegroundColor(self.foreground),
            Print(status_line(view)),
            ResetColor,
        )?;
        self.out.flush()
    }
}

impl<W: Write> SessionHooks for TerminalHooks<W> {
    fn render(&mut self, view: &SessionView) {
        if let Err(err) = self.draw(view) {
            warn!(error = %err, "render failed");
        }
    }

    fn chime(&mut self) -> Result<(), NotifyError> {
        self.out.write_all(BELL)?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn status_line(view: &SessionView) -> String {
    let hint = match view.mode {
        TimerMode::Running => "running  [space] pause",
        TimerMode::Paused => "paused   [space] start",
        TimerMode::Complete => "session complete  [space] start over",
    };
    format!(
        " {:<11} {}  {}  {}  [s]kip [r]eset [R]estart [q]uit ",
        view.label,
        view.display,
        view.cycle.dots(),
        hint
    )
}

fn rgb_color(hex: &str) -> Color {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => Color::Rgb { r, g, b },
        None => Color::Reset,
    }
}

/// Raw mode for the lifetime of the guard.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        crate::logging::set_raw_mode(true);
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show);
        let _ = terminal::disable_raw_mode();
        crate::logging::set_raw_mode(false);
    }
}

/// Forward key presses from a blocking reader thread.
pub fn spawn_key_reader() -> mpsc::UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "key reader stopped");
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomoflow_core::{Settings, TimerEngine};

    #[test]
    fn status_line_shows_time_label_and_dots() {
        let settings = Settings::default();
        let view = TimerEngine::new(&settings).view(&settings);
        let line = status_line(&view);
        assert!(line.contains("Focus Time"));
        assert!(line.contains("25:00"));
        assert!(line.contains("○○○○"));
        assert!(line.contains("paused"));
    }

    #[test]
    fn render_writes_themed_line() {
        let settings = Settings::default();
        let view = TimerEngine::new(&settings).view(&settings);
        let mut hooks = TerminalHooks::new(Vec::new(), &settings.theme());
        hooks.render(&view);
        let written = String::from_utf8(hooks.out).unwrap();
        assert!(written.contains("25:00"));
        // #BA4949 background as a truecolor escape.
        assert!(written.contains("48;2;186;73;73"));
    }

    #[test]
    fn chime_rings_the_bell() {
        let mut hooks = TerminalHooks::new(Vec::new(), &Settings::default().theme());
        hooks.chime().unwrap();
        assert_eq!(hooks.out, BELL);
    }

    #[test]
    fn bad_color_falls_back_to_terminal_default() {
        assert_eq!(rgb_color("nope"), Color::Reset);
        assert_eq!(rgb_color("#000000"), Color::Rgb { r: 0, g: 0, b: 0 });
    }
}
