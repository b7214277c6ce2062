//! Validated timer settings.
//!
//! A [`Settings`] value is an immutable snapshot: edits go through
//! [`validate`], which builds a new snapshot from raw input and the previous
//! one. The timer engine reads durations from whichever snapshot it is handed
//! when a segment starts.
//!
//! Serialized as a flat camelCase mapping so the stored blob reads the same
//! as the settings form.

mod theme;
mod validate;

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::timer::Segment;

pub use theme::{font_family_css, font_stylesheet_url, hex_to_rgb, Theme};
pub use validate::{parse_hex, validate, SettingsInput};

/// Allowed focus duration, in minutes.
pub const FOCUS_DURATION_BOUNDS: RangeInclusive<u32> = 1..=180;
/// Allowed short break duration, in minutes.
pub const SHORT_BREAK_BOUNDS: RangeInclusive<u32> = 1..=120;
/// Allowed long break duration, in minutes.
pub const LONG_BREAK_BOUNDS: RangeInclusive<u32> = 1..=240;
/// Allowed number of focus segments per cycle.
pub const CYCLES_BOUNDS: RangeInclusive<u32> = 2..=8;

pub const DEFAULT_BG_COLOR: &str = "#BA4949";
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_ACCENT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_FONT_FAMILY: &str = "google:Inter:wght@400;600";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Minutes.
    pub focus_duration: u32,
    /// Minutes.
    pub short_break_duration: u32,
    /// Minutes.
    pub long_break_duration: u32,
    pub cycles_before_long_break: u32,
    /// Completed focus segments after which the session ends.
    pub total_focus_count: u32,
    pub bg_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            cycles_before_long_break: 4,
            total_focus_count: 1000,
            bg_color: DEFAULT_BG_COLOR.into(),
            text_color: DEFAULT_TEXT_COLOR.into(),
            accent_color: DEFAULT_ACCENT_COLOR.into(),
            font_family: DEFAULT_FONT_FAMILY.into(),
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Duration of `segment` in minutes.
    pub fn duration_min(&self, segment: Segment) -> u32 {
        match segment {
            Segment::Focus => self.focus_duration,
            Segment::ShortBreak => self.short_break_duration,
            Segment::LongBreak => self.long_break_duration,
        }
    }

    /// Duration of `segment` in seconds.
    pub fn duration_secs(&self, segment: Segment) -> u32 {
        self.duration_min(segment).saturating_mul(60)
    }

    /// Override the session cap. Not reachable from the settings form; a
    /// cap below one is raised to one.
    pub fn with_total_focus_count(mut self, total: u32) -> Self {
        self.total_focus_count = total.max(1);
        self
    }

    /// Theme derived from the presentation fields.
    pub fn theme(&self) -> Theme {
        Theme::from_settings(self)
    }

    /// Get a field as display string by its stored (camelCase) key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Stored keys, in declaration order.
    pub fn keys() -> &'static [&'static str] {
        &[
            "focusDuration",
            "shortBreakDuration",
            "longBreakDuration",
            "cyclesBeforeLongBreak",
            "totalFocusCount",
            "bgColor",
            "textColor",
            "accentColor",
            "fontFamily",
            "soundEnabled",
        ]
    }
}
