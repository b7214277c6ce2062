//! Key bindings.
//!
//! Translates key presses into the engine's documented operations. Holds no
//! state of its own.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pomoflow_core::{Event, SessionContext, SessionHooks, TimerEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start or pause; starts over when the session is complete.
    StartPause,
    Skip,
    Reset,
    Restart,
    /// Re-read settings from disk and apply them.
    Reload,
    Quit,
}

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::StartPause),
        KeyCode::Char('s') => Some(Command::Skip),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('l') => Some(Command::Reload),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Apply a session command. `Reload` and `Quit` belong to the caller and
/// return `None` here.
pub fn dispatch<H>(
    command: Command,
    engine: &mut TimerEngine,
    now: Instant,
    cx: &mut SessionContext<'_, H>,
) -> Option<Event>
where
    H: SessionHooks + ?Sized,
{
    match command {
        Command::StartPause => {
            if engine.is_complete() {
                engine.reset(cx);
            }
            if engine.is_running() {
                engine.pause(cx)
            } else {
                engine.start(now, cx)
            }
        }
        Command::Skip => engine.skip(now, cx),
        Command::Reset => engine.reset(cx),
        Command::Restart => engine.restart_segment(now, cx),
        Command::Reload | Command::Quit => None,
    }
}
