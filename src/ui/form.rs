//! Signature details form
//!
//! The form never mutates the signature. It reads the current
//! `SignatureState` and reports what the user did as [`FormAction`]s; the
//! app folds them into a new state with [`apply_action`].

use crate::signature::color::validate_color_format;
use crate::signature::{ColorError, IconSet, ImageSource, Platform, SignatureState};
use crate::theme::ThemeColors;
use crate::ui::preview::parse_hex_color;
use eframe::egui::{self, RichText, Sense, Stroke, Ui, Vec2};

/// Hint shown under the color field.
const COLOR_FORMAT_HINT: &str = "Format: #RRGGBB (e.g., #FF3155)";

/// Tooltip next to the X platform.
const X_INFO: &str =
    "X is the new name for Twitter. Your existing Twitter profile URL will work with this icon.";

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// A single user edit, carrying the raw (unsanitized) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    FullName(String),
    JobTitle(String),
    OfficePhone(String),
    MobilePhone(String),
    ShowOfficePhone(bool),
    ShowMobilePhone(bool),
    Email(String),
    Website(String),
    TextColor(String),
    /// The color field lost focus
    CommitTextColor,
    Disclaimer(bool),
    SocialUrl(Platform, String),
    ToggleSocial(Platform),
    /// Open the image picker for the company logo
    UploadLogo,
    /// Go back to the logo placeholder
    ResetLogo,
    /// Open the icon picker for a platform
    ChangeIcon(Platform),
}

/// Follow-up work for the app after an action was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    None,
    ColorCommitted(Result<(), ColorError>),
    PickLogo,
    PickIcon(Platform),
}

/// Fold one action into the state.
pub fn apply_action(state: SignatureState, action: FormAction) -> (SignatureState, FormEffect) {
    let state = match action {
        FormAction::FullName(raw) => state.with_full_name(&raw),
        FormAction::JobTitle(raw) => state.with_job_title(&raw),
        FormAction::OfficePhone(raw) => state.with_office_phone(&raw),
        FormAction::MobilePhone(raw) => state.with_mobile_phone(&raw),
        FormAction::ShowOfficePhone(shown) => state.with_office_phone_shown(shown),
        FormAction::ShowMobilePhone(shown) => state.with_mobile_phone_shown(shown),
        FormAction::Email(raw) => state.with_email(&raw),
        FormAction::Website(raw) => state.with_website(&raw),
        FormAction::TextColor(raw) => state.with_text_color_input(&raw),
        FormAction::CommitTextColor => {
            let (state, result) = state.commit_text_color();
            return (state, FormEffect::ColorCommitted(result));
        }
        FormAction::Disclaimer(shown) => state.with_disclaimer(shown),
        FormAction::SocialUrl(platform, raw) => state.with_social_url(platform, &raw),
        FormAction::ToggleSocial(platform) => state.toggle_social(platform),
        FormAction::UploadLogo => return (state, FormEffect::PickLogo),
        FormAction::ResetLogo => state.with_company_logo(ImageSource::logo_placeholder()),
        FormAction::ChangeIcon(platform) => return (state, FormEffect::PickIcon(platform)),
    };
    (state, FormEffect::None)
}

// ─────────────────────────────────────────────────────────────────────────────
// Form Widget
// ─────────────────────────────────────────────────────────────────────────────

/// The "Signature Details" form.
#[derive(Debug, Default)]
pub struct SignatureForm;

impl SignatureForm {
    pub fn new() -> Self {
        Self
    }

    /// Show the form and collect this frame's actions.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        state: &SignatureState,
        icons: &IconSet,
        colors: &ThemeColors,
    ) -> Vec<FormAction> {
        let mut actions = Vec::new();

        ui.heading("Signature Details");
        ui.add_space(8.0);

        if let Some(v) = text_field(ui, "Full Name", state.full_name(), "Jane Doe") {
            actions.push(FormAction::FullName(v));
        }
        if let Some(v) = text_field(ui, "Job Title", state.job_title(), "Marketing Manager") {
            actions.push(FormAction::JobTitle(v));
        }

        section_label(ui, "Contact Information");
        self.phone_field(
            ui,
            "Office Phone Number",
            state.office_phone(),
            state.show_office_phone(),
            "(555) 123-4567",
            FormAction::ShowOfficePhone,
            FormAction::OfficePhone,
            &mut actions,
        );
        self.phone_field(
            ui,
            "Mobile Phone Number",
            state.mobile_phone(),
            state.show_mobile_phone(),
            "(555) 987-6543",
            FormAction::ShowMobilePhone,
            FormAction::MobilePhone,
            &mut actions,
        );

        if let Some(v) = text_field(ui, "Email Address", state.email(), "jane@example.com") {
            actions.push(FormAction::Email(v));
        }
        if let Some(v) = text_field(ui, "Website", state.website(), "www.example.com") {
            actions.push(FormAction::Website(v));
        }

        self.color_field(ui, state, colors, &mut actions);
        self.social_section(ui, state, icons, &mut actions);
        self.logo_section(ui, state, &mut actions);

        ui.add_space(8.0);
        let mut disclaimer = state.show_disclaimer();
        if ui
            .checkbox(&mut disclaimer, "Include Confidentiality Disclaimer")
            .changed()
        {
            actions.push(FormAction::Disclaimer(disclaimer));
        }

        actions
    }

    #[allow(clippy::too_many_arguments)]
    fn phone_field(
        &self,
        ui: &mut Ui,
        label: &str,
        value: &str,
        shown: bool,
        hint: &str,
        on_toggle: fn(bool) -> FormAction,
        on_edit: fn(String) -> FormAction,
        actions: &mut Vec<FormAction>,
    ) {
        let mut checked = shown;
        if ui.checkbox(&mut checked, label).changed() {
            actions.push(on_toggle(checked));
        }

        let mut buffer = value.to_string();
        let response = ui.add_enabled(
            shown,
            egui::TextEdit::singleline(&mut buffer)
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            actions.push(on_edit(buffer));
        }
        ui.add_space(6.0);
    }

    fn color_field(
        &self,
        ui: &mut Ui,
        state: &SignatureState,
        colors: &ThemeColors,
        actions: &mut Vec<FormAction>,
    ) {
        let validation = validate_color_format(state.text_color());

        ui.horizontal(|ui| {
            ui.label(RichText::new("Text Color (Hex)").strong());
            if validation.is_err() {
                ui.label(
                    RichText::new("⚠ Invalid format")
                        .small()
                        .color(colors.ui.error),
                );
            }
        });

        ui.horizontal(|ui| {
            let swatch = parse_hex_color(state.resolved_text_color()).unwrap_or_default();
            let border = if validation.is_ok() {
                colors.base.border
            } else {
                colors.ui.error
            };
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(22.0), Sense::hover());
            ui.painter().rect_filled(rect, 3.0, swatch);
            ui.painter().rect_stroke(rect, 3.0, Stroke::new(1.0, border));

            let mut buffer = state.text_color().to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut buffer)
                    .hint_text("#FF3155")
                    .char_limit(7)
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                actions.push(FormAction::TextColor(buffer));
            }
            if response.lost_focus() {
                actions.push(FormAction::CommitTextColor);
            }
        });

        if let Err(err) = validation {
            ui.label(RichText::new(err.to_string()).small().color(colors.ui.error));
        }
        ui.label(RichText::new(COLOR_FORMAT_HINT).small().weak());
        ui.add_space(6.0);
    }

    fn social_section(
        &self,
        ui: &mut Ui,
        state: &SignatureState,
        icons: &IconSet,
        actions: &mut Vec<FormAction>,
    ) {
        section_label(ui, "Social Media");

        for platform in Platform::ALL {
            let profile = state.social(platform);

            ui.horizontal(|ui| {
                let mut enabled = profile.enabled;
                if ui.checkbox(&mut enabled, platform.display_name()).changed() {
                    actions.push(FormAction::ToggleSocial(platform));
                }
                if platform == Platform::X {
                    ui.label(RichText::new("ℹ").weak()).on_hover_text(X_INFO);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Change Icon").clicked() {
                        actions.push(FormAction::ChangeIcon(platform));
                    }
                    if !icons.is_default(platform) {
                        ui.label(RichText::new("custom icon").small().weak())
                            .on_hover_text(icons.get(platform).describe());
                    }
                });
            });

            if profile.enabled {
                let mut buffer = profile.url.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut buffer)
                        .hint_text(platform.url_placeholder())
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    actions.push(FormAction::SocialUrl(platform, buffer));
                }
            }
            ui.add_space(4.0);
        }
    }

    fn logo_section(&self, ui: &mut Ui, state: &SignatureState, actions: &mut Vec<FormAction>) {
        section_label(ui, "Company Logo");

        ui.horizontal(|ui| {
            if ui.button("⬆ Upload Logo").clicked() {
                actions.push(FormAction::UploadLogo);
            }
            if !state.company_logo().is_placeholder() && ui.button("Reset").clicked() {
                actions.push(FormAction::ResetLogo);
            }
            ui.label(RichText::new(state.company_logo().describe()).small().weak());
        });
        ui.label(
            RichText::new("Recommended size: 180×60 pixels")
                .small()
                .weak(),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn section_label(ui: &mut Ui, text: &str) {
    ui.add_space(6.0);
    ui.label(RichText::new(text).strong());
}

/// A labelled single-line field. Returns the raw text if it was edited.
fn text_field(ui: &mut Ui, label: &str, value: &str, hint: &str) -> Option<String> {
    ui.label(RichText::new(label).strong());
    let mut buffer = value.to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut buffer)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);
    response.changed().then_some(buffer)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::DEFAULT_TEXT_COLOR;

    fn apply_all(actions: Vec<FormAction>) -> SignatureState {
        actions
            .into_iter()
            .fold(SignatureState::default(), |state, action| {
                apply_action(state, action).0
            })
    }

    #[test]
    fn test_text_actions_are_sanitized() {
        let state = apply_all(vec![
            FormAction::FullName("J4ne Doe!".to_string()),
            FormAction::OfficePhone("555-123-4567 ext".to_string()),
        ]);
        assert_eq!(state.full_name(), "Jne Doe");
        assert_eq!(state.office_phone(), "(555) 123-4567");
    }

    #[test]
    fn test_commit_reports_color_error() {
        let (state, _) = apply_action(
            SignatureState::default(),
            FormAction::TextColor("#12".to_string()),
        );
        let (state, effect) = apply_action(state, FormAction::CommitTextColor);

        assert_eq!(
            effect,
            FormEffect::ColorCommitted(Err(ColorError::InvalidFormat))
        );
        assert_eq!(state.text_color(), DEFAULT_TEXT_COLOR);
    }

    #[test]
    fn test_commit_accepts_valid_color() {
        let (state, _) = apply_action(
            SignatureState::default(),
            FormAction::TextColor("#6FAC43".to_string()),
        );
        let (state, effect) = apply_action(state, FormAction::CommitTextColor);
        assert_eq!(effect, FormEffect::ColorCommitted(Ok(())));
        assert_eq!(state.text_color(), "#6FAC43");
    }

    #[test]
    fn test_picker_actions_leave_state_alone() {
        let before = SignatureState::default().with_full_name("Jane");

        let (after, effect) = apply_action(before.clone(), FormAction::UploadLogo);
        assert_eq!(after, before);
        assert_eq!(effect, FormEffect::PickLogo);

        let (after, effect) = apply_action(before.clone(), FormAction::ChangeIcon(Platform::YouTube));
        assert_eq!(after, before);
        assert_eq!(effect, FormEffect::PickIcon(Platform::YouTube));
    }

    #[test]
    fn test_reset_logo_restores_placeholder() {
        let state = SignatureState::default()
            .with_company_logo(ImageSource::remote("https://cdn.example/logo.png"));
        let (state, _) = apply_action(state, FormAction::ResetLogo);
        assert!(state.company_logo().is_placeholder());
    }

    #[test]
    fn test_social_actions() {
        let state = apply_all(vec![
            FormAction::ToggleSocial(Platform::Facebook),
            FormAction::SocialUrl(Platform::Facebook, "https://facebook.com/jane".to_string()),
        ]);
        assert!(state.social(Platform::Facebook).is_visible());
        assert!(!state.social(Platform::X).is_visible());
    }
}
