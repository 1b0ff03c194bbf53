//! Theme Manager for Signet
//!
//! Holds the selected theme and pushes the matching egui `Visuals` into the
//! context whenever the effective palette changes. For `Theme::System` the
//! effective palette follows the context's current dark-mode flag.

use eframe::egui::{Context, Visuals};
use log::{debug, info};

use super::ThemeColors;
use crate::config::Theme;

/// Tracks the selected theme and what was last applied.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    theme: Theme,
    /// `(theme, dark)` of the last `apply`; `None` forces the next one
    applied: Option<(Theme, bool)>,
}

impl ThemeManager {
    pub fn new(theme: Theme) -> Self {
        info!("Theme manager starting with {:?}", theme);
        Self {
            theme,
            applied: None,
        }
    }

    pub fn current_theme(&self) -> Theme {
        self.theme
    }

    /// Select a theme. Takes effect on the next `apply`/`apply_if_needed`.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            info!("Theme changed from {:?} to {:?}", self.theme, theme);
            self.theme = theme;
            self.applied = None;
        }
    }

    /// Whether the selected theme is dark, given the platform preference.
    fn resolves_dark(&self, system_dark: bool) -> bool {
        match self.theme {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => system_dark,
        }
    }

    fn visuals_for(&self, system_dark: bool) -> Visuals {
        if self.resolves_dark(system_dark) {
            ThemeColors::dark().to_visuals()
        } else {
            ThemeColors::light().to_visuals()
        }
    }

    /// Apply the selected theme unconditionally.
    pub fn apply(&mut self, ctx: &Context) {
        let system_dark = ctx.style().visuals.dark_mode;
        ctx.set_visuals(self.visuals_for(system_dark));
        self.applied = Some((self.theme, self.resolves_dark(system_dark)));
        debug!("Applied theme {:?}", self.theme);
    }

    /// Apply only if the selection or the effective palette changed.
    /// Returns `true` if visuals were pushed.
    pub fn apply_if_needed(&mut self, ctx: &Context) -> bool {
        let system_dark = ctx.style().visuals.dark_mode;
        let wanted = (self.theme, self.resolves_dark(system_dark));
        if self.applied == Some(wanted) {
            return false;
        }
        self.apply(ctx);
        true
    }

    /// Palette of the effective theme, for widgets that draw custom colors.
    pub fn colors(&self, ctx: &Context) -> ThemeColors {
        ThemeColors::from_theme(self.theme, &ctx.style().visuals)
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manager_is_unapplied() {
        let manager = ThemeManager::new(Theme::Dark);
        assert_eq!(manager.current_theme(), Theme::Dark);
        assert!(manager.applied.is_none());
    }

    #[test]
    fn test_set_theme_resets_applied_state() {
        let mut manager = ThemeManager::new(Theme::Light);
        manager.applied = Some((Theme::Light, false));

        manager.set_theme(Theme::Light);
        assert!(manager.applied.is_some());

        manager.set_theme(Theme::Dark);
        assert_eq!(manager.current_theme(), Theme::Dark);
        assert!(manager.applied.is_none());
    }

    #[test]
    fn test_resolves_dark() {
        assert!(!ThemeManager::new(Theme::Light).resolves_dark(true));
        assert!(ThemeManager::new(Theme::Dark).resolves_dark(false));

        let system = ThemeManager::new(Theme::System);
        assert!(system.resolves_dark(true));
        assert!(!system.resolves_dark(false));
    }

    #[test]
    fn test_visuals_match_theme() {
        assert!(ThemeManager::new(Theme::Dark).visuals_for(false).dark_mode);
        assert!(!ThemeManager::new(Theme::Light).visuals_for(true).dark_mode);
    }

    #[test]
    fn test_apply_if_needed_runs_once() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);

        assert!(manager.apply_if_needed(&ctx));
        assert!(ctx.style().visuals.dark_mode);
        assert!(!manager.apply_if_needed(&ctx));

        manager.set_theme(Theme::Light);
        assert!(manager.apply_if_needed(&ctx));
        assert!(!ctx.style().visuals.dark_mode);
    }
}
