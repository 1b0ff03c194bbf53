//! Accent color input handling
//!
//! The color field has two checks. While typing, [`filter_color_input`] only
//! lets through a `#` followed by up to six hex digits. When the field loses
//! focus, [`validate_color_format`] demands the complete `#RRGGBB` form and
//! the caller resets the field to [`DEFAULT_TEXT_COLOR`] on failure.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Accent color used whenever the user's value is not a complete `#RRGGBB`.
pub const DEFAULT_TEXT_COLOR: &str = "#47403d";

static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
static PARTIAL_HEX_COLOR: OnceLock<Regex> = OnceLock::new();

fn hex_color() -> &'static Regex {
    HEX_COLOR.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"))
}

fn partial_hex_color() -> &'static Regex {
    PARTIAL_HEX_COLOR
        .get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{0,6}$").expect("valid partial color regex"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Commit-time Validation
// ─────────────────────────────────────────────────────────────────────────────

/// Why a committed color value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorError {
    /// The field is empty
    Required,
    /// The value does not begin with `#`
    MissingHash,
    /// Wrong length or non-hex digits
    InvalidFormat,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::Required => write!(f, "Color code is required"),
            ColorError::MissingHash => write!(f, "Color code must start with #"),
            ColorError::InvalidFormat => write!(f, "Color code must be in format #RRGGBB"),
        }
    }
}

impl std::error::Error for ColorError {}

/// Check that `color` is exactly `#` plus six hex digits.
pub fn validate_color_format(color: &str) -> Result<(), ColorError> {
    if color.is_empty() {
        return Err(ColorError::Required);
    }
    if !color.starts_with('#') {
        return Err(ColorError::MissingHash);
    }
    if !hex_color().is_match(color) {
        return Err(ColorError::InvalidFormat);
    }
    Ok(())
}

/// Returns `true` if `color` is a complete `#RRGGBB` value.
pub fn is_valid_color(color: &str) -> bool {
    hex_color().is_match(color)
}

/// Pick the color to render with: `color` if it is complete, else `fallback`.
pub fn resolve_color<'a>(color: &'a str, fallback: &'a str) -> &'a str {
    if is_valid_color(color) {
        color
    } else {
        fallback
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-progress Filtering
// ─────────────────────────────────────────────────────────────────────────────

/// Filter a color field edit.
///
/// `current` is the value before the edit and `raw` the content after it.
/// A missing leading `#` is added back to non-empty input. If the result is
/// not `#` plus at most six hex digits, the edit is rejected and `current` is
/// returned. Clearing the field is rejected too; the bare `#` is the shortest
/// accepted value.
pub fn filter_color_input(current: &str, raw: &str) -> String {
    let candidate = if raw.is_empty() || raw.starts_with('#') {
        raw.to_string()
    } else {
        format!("#{}", raw.replacen('#', "", 1))
    };

    if partial_hex_color().is_match(&candidate) {
        candidate
    } else {
        current.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_color_format_cases() {
        assert_eq!(validate_color_format("#FF3155"), Ok(()));
        assert_eq!(validate_color_format("#ff3155"), Ok(()));
        assert_eq!(validate_color_format("FF3155"), Err(ColorError::MissingHash));
        assert_eq!(validate_color_format("#FF31"), Err(ColorError::InvalidFormat));
        assert_eq!(validate_color_format("#GG3155"), Err(ColorError::InvalidFormat));
        assert_eq!(validate_color_format("#FF31556"), Err(ColorError::InvalidFormat));
        assert_eq!(validate_color_format(""), Err(ColorError::Required));
    }

    #[test]
    fn test_color_error_messages() {
        assert_eq!(ColorError::Required.to_string(), "Color code is required");
        assert_eq!(
            ColorError::MissingHash.to_string(),
            "Color code must start with #"
        );
        assert_eq!(
            ColorError::InvalidFormat.to_string(),
            "Color code must be in format #RRGGBB"
        );
    }

    #[test]
    fn test_default_color_is_valid() {
        assert!(is_valid_color(DEFAULT_TEXT_COLOR));
    }

    #[test]
    fn test_resolve_color_falls_back() {
        assert_eq!(resolve_color("#112233", DEFAULT_TEXT_COLOR), "#112233");
        assert_eq!(resolve_color("#1122", DEFAULT_TEXT_COLOR), DEFAULT_TEXT_COLOR);
        assert_eq!(resolve_color("", DEFAULT_TEXT_COLOR), DEFAULT_TEXT_COLOR);
        assert_eq!(resolve_color("red", DEFAULT_TEXT_COLOR), DEFAULT_TEXT_COLOR);
    }

    #[test]
    fn test_filter_color_input_prepends_hash() {
        assert_eq!(filter_color_input("", "f"), "#f");
        assert_eq!(filter_color_input("#", "FF3155"), "#FF3155");
        // Typing before the hash moves it to the front
        assert_eq!(filter_color_input("#12", "a#12"), "#a12");
    }

    #[test]
    fn test_filter_color_input_rejects_bad_keystrokes() {
        assert_eq!(filter_color_input("#12", "#12g"), "#12");
        assert_eq!(filter_color_input("#123456", "#1234567"), "#123456");
        assert_eq!(filter_color_input("#12", "##12"), "#12");
    }

    #[test]
    fn test_filter_color_input_rejects_clearing_but_allows_bare_hash() {
        assert_eq!(filter_color_input("#123", ""), "#123");
        assert_eq!(filter_color_input("#", ""), "#");
        assert_eq!(filter_color_input("#1", "#"), "#");
    }

    #[test]
    fn test_filter_color_input_is_stable_on_accepted_values() {
        for value in ["#", "#a", "#abc", "#ABCDEF"] {
            assert_eq!(filter_color_input("#000", value), value);
        }
    }
}
