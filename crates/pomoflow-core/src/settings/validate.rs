use std::ops::RangeInclusive;

use super::{
    Settings, CYCLES_BOUNDS, DEFAULT_BG_COLOR, DEFAULT_TEXT_COLOR, FOCUS_DURATION_BOUNDS,
    LONG_BREAK_BOUNDS, SHORT_BREAK_BOUNDS,
};
use crate::error::ConfigError;

/// Raw, unvalidated values from the settings form.
///
/// `None` means the field was not part of this edit and keeps its previous
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsInput {
    pub focus_duration: Option<String>,
    pub short_break_duration: Option<String>,
    pub long_break_duration: Option<String>,
    pub cycles_before_long_break: Option<String>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub sound_enabled: Option<bool>,
}

impl SettingsInput {
    /// Populate every form field from an existing snapshot.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            focus_duration: Some(settings.focus_duration.to_string()),
            short_break_duration: Some(settings.short_break_duration.to_string()),
            long_break_duration: Some(settings.long_break_duration.to_string()),
            cycles_before_long_break: Some(settings.cycles_before_long_break.to_string()),
            bg_color: Some(settings.bg_color.clone()),
            text_color: Some(settings.text_color.clone()),
            sound_enabled: Some(settings.sound_enabled),
        }
    }

    /// Set one form field by its stored key.
    ///
    /// Only rejects keys; the value itself is judged later by [`validate`].
    /// An unreadable `soundEnabled` value leaves the checkbox untouched.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let slot = match key {
            "focusDuration" => &mut self.focus_duration,
            "shortBreakDuration" => &mut self.short_break_duration,
            "longBreakDuration" => &mut self.long_break_duration,
            "cyclesBeforeLongBreak" => &mut self.cycles_before_long_break,
            "bgColor" => &mut self.bg_color,
            "textColor" => &mut self.text_color,
            "soundEnabled" => {
                self.sound_enabled = parse_flag(value);
                return Ok(());
            }
            "totalFocusCount" | "accentColor" | "fontFamily" => {
                return Err(ConfigError::ReadOnlyKey(key.to_string()))
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        *slot = Some(value.to_string());
        Ok(())
    }
}

/// Build a new snapshot from a form edit.
///
/// Numeric fields that fail to parse or fall outside their bounds keep the
/// value from `previous`, so one bad field never disturbs the others. Colors
/// that are not strict `#RRGGBB` fall back to the default color instead.
/// The accent color tracks the text color.
pub fn validate(raw: &SettingsInput, previous: &Settings) -> Settings {
    let text_color = color_or_default(
        raw.text_color.as_deref(),
        &previous.text_color,
        DEFAULT_TEXT_COLOR,
    );

    Settings {
        focus_duration: bounded(
            raw.focus_duration.as_deref(),
            FOCUS_DURATION_BOUNDS,
            previous.focus_duration,
        ),
        short_break_duration: bounded(
            raw.short_break_duration.as_deref(),
            SHORT_BREAK_BOUNDS,
            previous.short_break_duration,
        ),
        long_break_duration: bounded(
            raw.long_break_duration.as_deref(),
            LONG_BREAK_BOUNDS,
            previous.long_break_duration,
        ),
        cycles_before_long_break: bounded(
            raw.cycles_before_long_break.as_deref(),
            CYCLES_BOUNDS,
            previous.cycles_before_long_break,
        ),
        total_focus_count: previous.total_focus_count,
        bg_color: color_or_default(raw.bg_color.as_deref(), &previous.bg_color, DEFAULT_BG_COLOR),
        accent_color: text_color.clone(),
        text_color,
        font_family: previous.font_family.clone(),
        sound_enabled: raw.sound_enabled.unwrap_or(previous.sound_enabled),
    }
}

/// Strict `#RRGGBB` check, normalized to uppercase.
pub fn parse_hex(value: &str) -> Option<String> {
    let hex = value.trim();
    let digits = hex.strip_prefix('#')?;
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hex.to_ascii_uppercase())
    } else {
        None
    }
}

fn bounded(raw: Option<&str>, bounds: RangeInclusive<u32>, previous: u32) -> u32 {
    let Some(raw) = raw else {
        return previous;
    };
    match raw.trim().parse::<u32>() {
        Ok(n) if bounds.contains(&n) => n,
        _ => previous,
    }
}

fn color_or_default(raw: Option<&str>, previous: &str, default: &str) -> String {
    match raw {
        None => previous.to_string(),
        Some(v) => parse_hex(v).unwrap_or_else(|| default.to_string()),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
