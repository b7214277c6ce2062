//! Collaborators the engine notifies.

use super::view::SessionView;
use crate::error::NotifyError;

/// Render and chime callbacks.
///
/// Hooks receive an owned snapshot, never the engine, so nothing invoked
/// from inside a tick can call back into it.
pub trait SessionHooks {
    /// Called after every state mutation.
    fn render(&mut self, view: &SessionView);

    /// Called once per naturally finished segment when sound is enabled.
    /// Errors are logged by the engine and otherwise ignored.
    fn chime(&mut self) -> Result<(), NotifyError>;
}

/// Hooks that do nothing. Useful for headless driving of the engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {
    fn render(&mut self, _view: &SessionView) {}

    fn chime(&mut self) -> Result<(), NotifyError> {
        Ok(())
    }
}
