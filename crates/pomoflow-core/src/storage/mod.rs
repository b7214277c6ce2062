mod settings_store;

pub use settings_store::{merge_stored, SettingsStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/pomoflow[-dev]/` based on POMOFLOW_ENV.
///
/// Set POMOFLOW_ENV=dev to use the development data directory, or
/// POMOFLOW_DATA_DIR to use an arbitrary directory.
///
/// # Errors
/// Returns an error if no directory can be determined or if creating it
/// fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("POMOFLOW_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join(".config");

            let env = std::env::var("POMOFLOW_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomoflow-dev")
            } else {
                base_dir.join("pomoflow")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDirFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
