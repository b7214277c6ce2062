//! # Pomoflow Core Library
//!
//! Core logic for the Pomoflow focus timer. Front-ends (the `pomoflow` CLI)
//! are thin adapters that translate platform events into calls on the
//! session engine and draw whatever the engine hands back.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a wall-clock-driven session state machine. The caller
//!   periodically invokes `tick()` with the current instant; elapsed time is
//!   drained into whole seconds through a drift accumulator.
//! - **Settings**: validated durations, cycle length, totals and theme,
//!   merged from stored preferences over defaults.
//! - **Storage**: flat TOML settings file in the user's config directory.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: session state machine and tick engine
//! - [`Settings`]: validated configuration snapshot
//! - [`SettingsStore`]: settings persistence
//! - [`SessionHooks`]: render and chime collaborators

pub mod error;
pub mod events;
pub mod settings;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, NotifyError};
pub use events::Event;
pub use settings::{validate, Settings, SettingsInput, Theme};
pub use storage::SettingsStore;
pub use timer::{
    NoopHooks, Segment, SessionContext, SessionHooks, SessionState, SessionView, TimerEngine,
    TimerMode,
};
