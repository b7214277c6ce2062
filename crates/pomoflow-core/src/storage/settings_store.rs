//! Flat TOML settings file.
//!
//! The file is a single table keyed like the settings form
//! (`focusDuration = 25`, `bgColor = "#BA4949"`, ...). Loading merges it
//! over the defaults and re-validates every field; saving overwrites the
//! whole file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use toml::Value;
use tracing::{debug, warn};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::settings::{parse_hex, validate, Settings, SettingsInput};

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub const FILE_NAME: &'static str = "settings.toml";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/settings.toml`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?.join(Self::FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and sanitize. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// TOML table.
    pub fn try_load(&self) -> Result<Settings> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(err) => {
                return Err(ConfigError::LoadFailed {
                    path: self.path.clone(),
                    message: err.to_string(),
                }
                .into())
            }
        };
        let table: toml::Table = content.parse().map_err(|err: toml::de::Error| {
            ConfigError::LoadFailed {
                path: self.path.clone(),
                message: err.to_string(),
            }
        })?;
        Ok(merge_stored(&table))
    }

    /// Load, returning defaults on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "settings unavailable, falling back to defaults");
                Settings::default()
            }
        }
    }

    /// Persist, overwriting the whole file.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: self.path.clone(),
            message,
        };
        let content = toml::to_string_pretty(settings).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| save_failed(e.to_string()))?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Merge a stored table over the defaults.
///
/// Form fields go through [`validate`] against the defaults, so anything
/// ill-typed or out of range lands on the default value. Unknown keys are
/// ignored.
pub fn merge_stored(table: &toml::Table) -> Settings {
    let defaults = Settings::default();
    let raw = |key: &str| table.get(key).and_then(raw_string);

    let input = SettingsInput {
        focus_duration: raw("focusDuration"),
        short_break_duration: raw("shortBreakDuration"),
        long_break_duration: raw("longBreakDuration"),
        cycles_before_long_break: raw("cyclesBeforeLongBreak"),
        bg_color: raw("bgColor"),
        text_color: raw("textColor"),
        sound_enabled: table.get("soundEnabled").and_then(Value::as_bool),
    };
    let mut settings = validate(&input, &defaults);

    settings.accent_color = table
        .get("accentColor")
        .and_then(Value::as_str)
        .and_then(parse_hex)
        .unwrap_or(defaults.accent_color);
    settings.total_focus_count = table
        .get("totalFocusCount")
        .and_then(Value::as_integer)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n >= 1)
        .unwrap_or(defaults.total_focus_count);
    settings.font_family = table
        .get("fontFamily")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .unwrap_or(defaults.font_family);
    settings
}

fn raw_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(n) => Some(n.to_string()),
        Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}
