//! Application preferences for Signet
//!
//! This module defines the `Settings` struct that holds the user's
//! preferences, with serde support for JSON persistence. The signature being
//! edited is deliberately not part of it: every session starts blank.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the application window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    /// Get a display label for the theme.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    /// Get all themes in menu order.
    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::System]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// What "Copy HTML" puts on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardFormat {
    /// Rich HTML flavor with a plain-text fallback; pastes formatted
    #[default]
    RichHtml,
    /// The HTML source as plain text
    HtmlSource,
}

impl ClipboardFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ClipboardFormat::RichHtml => "Formatted (rich HTML)",
            ClipboardFormat::HtmlSource => "HTML source as text",
        }
    }

    pub fn all() -> &'static [ClipboardFormat] {
        &[ClipboardFormat::RichHtml, ClipboardFormat::HtmlSource]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 780.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences.
///
/// All fields have defaults via `#[serde(default)]`, so older or partial
/// config files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Window size and position
    pub window_size: WindowSize,

    /// Clipboard flavor produced by "Copy HTML"
    pub clipboard_format: ClipboardFormat,

    /// Largest logo/icon upload that will be embedded, in KB
    pub max_image_size_kb: u32,

    /// Directory the image picker opened last
    pub last_image_directory: Option<PathBuf>,

    /// Directory the last HTML file was saved to
    pub last_export_directory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            window_size: WindowSize::default(),
            clipboard_format: ClipboardFormat::default(),
            max_image_size_kb: 512,
            last_image_directory: None,
            last_export_directory: None,
        }
    }
}

impl Settings {
    /// Minimum embedded image limit in KB.
    pub const MIN_IMAGE_SIZE_KB: u32 = 16;
    /// Maximum embedded image limit in KB.
    pub const MAX_IMAGE_SIZE_KB: u32 = 4096;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Embedded image limit in bytes.
    pub fn max_image_bytes(&self) -> u64 {
        u64::from(self.max_image_size_kb) * 1024
    }

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.max_image_size_kb = self
            .max_image_size_kb
            .clamp(Self::MIN_IMAGE_SIZE_KB, Self::MAX_IMAGE_SIZE_KB);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
    }

    /// Deserialize and then sanitize.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
