use serde::Serialize;

use super::Settings;

const GOOGLE_FONT_PREFIX: &str = "google:";

/// Presentation view of [`Settings`]. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub accent: String,
    /// CSS `font-family` value.
    pub font_family: String,
    /// Web font stylesheet to load, for `google:` font references.
    pub font_stylesheet: Option<String>,
}

impl Theme {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            background: settings.bg_color.clone(),
            text: settings.text_color.clone(),
            accent: settings.accent_color.clone(),
            font_family: font_family_css(&settings.font_family),
            font_stylesheet: font_stylesheet_url(&settings.font_family),
        }
    }
}

/// `google:Inter:wght@400;600` -> `'Inter', system-ui, sans-serif`.
/// Anything else is already a CSS value.
pub fn font_family_css(value: &str) -> String {
    match value.strip_prefix(GOOGLE_FONT_PREFIX) {
        Some(rest) => {
            let family = rest.split(':').next().unwrap_or_default();
            format!("'{family}', system-ui, sans-serif")
        }
        None => value.to_string(),
    }
}

pub fn font_stylesheet_url(value: &str) -> Option<String> {
    let reference = value.strip_prefix(GOOGLE_FONT_PREFIX)?.replace(' ', "+");
    Some(format!(
        "https://fonts.googleapis.com/css2?family={reference}&display=swap"
    ))
}

/// `#RRGGBB` -> `(r, g, b)`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
