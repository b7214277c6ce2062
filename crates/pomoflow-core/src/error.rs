//! Core error types for pomoflow-core.
//!
//! Expected conditions (a segment reaching zero, the focus total being hit,
//! a malformed settings edit) are branches on state, never errors. What lands
//! here is I/O at the edges: the settings file, the event log and the chime
//! collaborator. Chime failures stay inside the engine as [`NotifyError`];
//! they are logged and never reach [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomoflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The home directory could not be determined and no override was set
    #[error("Could not determine a data directory (set POMOFLOW_DATA_DIR)")]
    NoDataDir,

    /// Failed to create the data directory
    #[error("Failed to create data directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key is not a settings field
    #[error(
        "unknown settings key: {0} (known keys: {known})",
        known = crate::settings::Settings::keys().join(", ")
    )]
    UnknownKey(String),

    /// Key exists but cannot be edited through the settings form
    #[error("settings key '{0}' is read-only")]
    ReadOnlyKey(String),
}

/// Failure reported by a chime/notification collaborator.
///
/// Never propagated out of the state machine: the engine logs it and carries
/// on with the transition.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// No output device or backend available
    #[error("notification backend unavailable: {0}")]
    Unavailable(String),

    /// Writing the chime failed
    #[error("failed to emit chime: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_lists_known_keys() {
        let msg = ConfigError::UnknownKey("volume".into()).to_string();
        assert!(msg.starts_with("unknown settings key: volume"));
        assert!(msg.contains("focusDuration"));
        assert!(msg.contains("soundEnabled"));
    }

    #[test]
    fn config_errors_convert_into_core_errors() {
        let err: CoreError = ConfigError::NoDataDir.into();
        assert!(matches!(err, CoreError::Config(ConfigError::NoDataDir)));
        assert!(err.to_string().contains("POMOFLOW_DATA_DIR"));
    }
}
