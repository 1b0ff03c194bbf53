//! Theme System for Signet
//!
//! Colors and spacing for the application chrome. The signature preview
//! itself is not themed: it is always painted on a white "message body"
//! canvas, because that is where the signature will end up.
//!
//! The `Theme` enum in `config::settings` (Light/Dark/System) selects which
//! palette is used at runtime; `ThemeManager` applies it to the egui context.

pub mod manager;

pub use manager::ThemeManager;

use eframe::egui::{self, Color32, Rounding, Stroke, Visuals};

/// Brand green used for accents in the application chrome.
pub const BRAND_ACCENT: Color32 = Color32::from_rgb(0x6f, 0xac, 0x43);

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Colors for the application UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Base UI colors (backgrounds, borders)
    pub base: BaseColors,
    /// Text colors for various contexts
    pub text: TextColors,
    /// UI feedback colors (accent, success, error)
    pub ui: UiColors,
    /// Colors of the preview canvas
    pub preview: PreviewColors,
}

impl ThemeColors {
    /// Create theme colors for the given theme variant.
    pub fn from_theme(theme: crate::config::Theme, visuals: &Visuals) -> Self {
        match theme {
            crate::config::Theme::Dark => Self::dark(),
            crate::config::Theme::Light => Self::light(),
            crate::config::Theme::System => {
                if visuals.dark_mode {
                    Self::dark()
                } else {
                    Self::light()
                }
            }
        }
    }

    /// Get the light theme colors.
    pub fn light() -> Self {
        Self {
            base: BaseColors {
                background: Color32::from_rgb(255, 255, 255),
                background_secondary: Color32::from_rgb(248, 249, 247),
                background_tertiary: Color32::from_rgb(240, 242, 238),
                border: Color32::from_rgb(200, 204, 198),
                border_subtle: Color32::from_rgb(228, 231, 226),
                hover: Color32::from_rgb(236, 240, 233),
                selected: Color32::from_rgb(222, 238, 211),
            },
            text: TextColors {
                primary: Color32::from_rgb(40, 40, 40),
                secondary: Color32::from_rgb(90, 90, 90),
                muted: Color32::from_rgb(135, 135, 135),
                link: Color32::from_rgb(0, 102, 204),
            },
            ui: UiColors {
                accent: BRAND_ACCENT,
                accent_hover: Color32::from_rgb(0x5c, 0x92, 0x36),
                success: Color32::from_rgb(40, 167, 69),
                error: Color32::from_rgb(220, 53, 69),
            },
            preview: PreviewColors::default(),
        }
    }

    /// Get the dark theme colors.
    pub fn dark() -> Self {
        Self {
            base: BaseColors {
                background: Color32::from_rgb(30, 31, 30),
                background_secondary: Color32::from_rgb(38, 40, 37),
                background_tertiary: Color32::from_rgb(47, 50, 46),
                border: Color32::from_rgb(70, 74, 68),
                border_subtle: Color32::from_rgb(55, 58, 53),
                hover: Color32::from_rgb(52, 58, 49),
                selected: Color32::from_rgb(50, 72, 38),
            },
            text: TextColors {
                primary: Color32::from_rgb(225, 225, 225),
                secondary: Color32::from_rgb(180, 180, 180),
                muted: Color32::from_rgb(130, 130, 130),
                link: Color32::from_rgb(100, 170, 255),
            },
            ui: UiColors {
                accent: BRAND_ACCENT,
                accent_hover: Color32::from_rgb(0x86, 0xc0, 0x5a),
                success: Color32::from_rgb(80, 200, 110),
                error: Color32::from_rgb(240, 90, 100),
            },
            preview: PreviewColors::default(),
        }
    }

    /// Check if this is a dark theme.
    pub fn is_dark(&self) -> bool {
        self.base.background.r() < 128
    }

    /// Convert theme colors to egui Visuals.
    pub fn to_visuals(&self) -> Visuals {
        create_visuals(self)
    }
}

/// Base UI colors for backgrounds and borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    pub background: Color32,
    pub background_secondary: Color32,
    pub background_tertiary: Color32,
    pub border: Color32,
    pub border_subtle: Color32,
    pub hover: Color32,
    pub selected: Color32,
}

/// Text colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    pub primary: Color32,
    pub secondary: Color32,
    pub muted: Color32,
    pub link: Color32,
}

/// Accent and feedback colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    pub accent: Color32,
    pub accent_hover: Color32,
    pub success: Color32,
    pub error: Color32,
}

/// Colors of the signature preview canvas. Identical in both themes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewColors {
    pub canvas: Color32,
    pub canvas_border: Color32,
    pub image_placeholder: Color32,
    pub link: Color32,
}

impl Default for PreviewColors {
    fn default() -> Self {
        Self {
            canvas: Color32::WHITE,
            canvas_border: Color32::from_rgb(220, 220, 220),
            image_placeholder: Color32::from_rgb(234, 234, 234),
            link: Color32::from_rgb(0, 102, 204),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme Spacing
// ─────────────────────────────────────────────────────────────────────────────

/// Spacing scale shared by widgets and panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSpacing {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
}

impl Default for ThemeSpacing {
    fn default() -> Self {
        Self {
            xs: 2.0,
            sm: 4.0,
            md: 8.0,
            lg: 16.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Visuals
// ─────────────────────────────────────────────────────────────────────────────

/// Build egui Visuals from a palette.
fn create_visuals(colors: &ThemeColors) -> Visuals {
    let spacing = ThemeSpacing::default();
    let dark = colors.is_dark();

    let mut visuals = if dark { Visuals::dark() } else { Visuals::light() };

    visuals.panel_fill = colors.base.background;
    visuals.window_fill = colors.base.background;
    visuals.extreme_bg_color = colors.base.background_tertiary;
    visuals.faint_bg_color = colors.base.background_secondary;

    visuals.override_text_color = None;
    visuals.error_fg_color = colors.ui.error;
    visuals.hyperlink_color = colors.text.link;

    visuals.selection.bg_fill = colors.base.selected;
    visuals.selection.stroke = Stroke::new(1.0, colors.ui.accent);

    let widgets = &mut visuals.widgets;

    widgets.noninteractive.bg_fill = colors.base.background_secondary;
    widgets.noninteractive.weak_bg_fill = colors.base.background_tertiary;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.base.border_subtle);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text.primary);

    widgets.inactive.bg_fill = colors.base.background_secondary;
    widgets.inactive.weak_bg_fill = colors.base.background_tertiary;
    widgets.inactive.bg_stroke = Stroke::new(1.0, colors.base.border);
    widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text.secondary);

    widgets.hovered.bg_fill = colors.base.hover;
    widgets.hovered.weak_bg_fill = colors.base.hover;
    widgets.hovered.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    widgets.hovered.fg_stroke = Stroke::new(1.5, colors.text.primary);

    widgets.active.bg_fill = colors.ui.accent;
    widgets.active.weak_bg_fill = colors.base.selected;
    widgets.active.bg_stroke = Stroke::new(1.0, colors.ui.accent_hover);
    widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);

    widgets.open.bg_fill = colors.base.selected;
    widgets.open.weak_bg_fill = colors.base.selected;
    widgets.open.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    widgets.open.fg_stroke = Stroke::new(1.0, colors.text.primary);

    for state in [
        &mut widgets.noninteractive,
        &mut widgets.inactive,
        &mut widgets.hovered,
        &mut widgets.active,
        &mut widgets.open,
    ] {
        state.rounding = Rounding::same(spacing.sm);
    }

    visuals.window_rounding = Rounding::same(spacing.md);
    visuals.window_stroke = Stroke::new(1.0, colors.base.border);
    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 2.0),
        blur: 8.0,
        spread: 0.0,
        color: Color32::from_black_alpha(if dark { 60 } else { 25 }),
    };
    visuals.menu_rounding = Rounding::same(spacing.sm);

    visuals.slider_trailing_fill = true;
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
    visuals.dark_mode = dark;

    visuals
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;

    #[test]
    fn test_from_theme_explicit() {
        let system = Visuals::dark();
        assert!(!ThemeColors::from_theme(Theme::Light, &system).is_dark());
        assert!(ThemeColors::from_theme(Theme::Dark, &Visuals::light()).is_dark());
    }

    #[test]
    fn test_from_theme_follows_system() {
        assert!(ThemeColors::from_theme(Theme::System, &Visuals::dark()).is_dark());
        assert!(!ThemeColors::from_theme(Theme::System, &Visuals::light()).is_dark());
    }

    #[test]
    fn test_visuals_match_palette() {
        let light = ThemeColors::light().to_visuals();
        assert!(!light.dark_mode);
        assert!(light.panel_fill.r() > 200);
        assert_eq!(light.selection.stroke.color, BRAND_ACCENT);

        let dark = ThemeColors::dark().to_visuals();
        assert!(dark.dark_mode);
        assert!(dark.panel_fill.r() < 100);
    }

    #[test]
    fn test_preview_canvas_is_theme_independent() {
        assert_eq!(ThemeColors::light().preview, ThemeColors::dark().preview);
        assert_eq!(ThemeColors::light().preview.canvas, Color32::WHITE);
    }
}
