//! Signature form state
//!
//! `SignatureState` is the single aggregate edited by the form. Fields are
//! private: every change goes through a transition that consumes the state,
//! runs the matching sanitizer and returns the new state.

use super::color::{filter_color_input, resolve_color, validate_color_format, ColorError};
use super::color::DEFAULT_TEXT_COLOR;
use super::media::ImageSource;
use super::platform::Platform;
use super::sanitize::{format_phone, sanitize_name_like};
use log::debug;
use std::collections::BTreeMap;

/// URL and visibility for one platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialProfile {
    /// Profile URL, used verbatim as the link target
    pub url: String,
    /// Whether the icon should appear in the signature
    pub enabled: bool,
}

impl SocialProfile {
    /// The icon is emitted only when enabled and a URL is present.
    pub fn is_visible(&self) -> bool {
        self.enabled && !self.url.is_empty()
    }
}

/// Everything the user has entered for the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureState {
    full_name: String,
    job_title: String,
    office_phone: String,
    mobile_phone: String,
    show_office_phone: bool,
    show_mobile_phone: bool,
    email: String,
    website: String,
    company_logo: ImageSource,
    text_color: String,
    show_disclaimer: bool,
    social: BTreeMap<Platform, SocialProfile>,
}

impl Default for SignatureState {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            job_title: String::new(),
            office_phone: String::new(),
            mobile_phone: String::new(),
            show_office_phone: false,
            show_mobile_phone: false,
            email: String::new(),
            website: String::new(),
            company_logo: ImageSource::logo_placeholder(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            show_disclaimer: false,
            social: Platform::ALL
                .into_iter()
                .map(|p| (p, SocialProfile::default()))
                .collect(),
        }
    }
}

impl SignatureState {
    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn office_phone(&self) -> &str {
        &self.office_phone
    }

    pub fn mobile_phone(&self) -> &str {
        &self.mobile_phone
    }

    pub fn show_office_phone(&self) -> bool {
        self.show_office_phone
    }

    pub fn show_mobile_phone(&self) -> bool {
        self.show_mobile_phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn website(&self) -> &str {
        &self.website
    }

    pub fn company_logo(&self) -> &ImageSource {
        &self.company_logo
    }

    /// The color field's current text, possibly incomplete while editing.
    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    /// The accent color to render with; always a complete `#RRGGBB`.
    pub fn resolved_text_color(&self) -> &str {
        resolve_color(&self.text_color, DEFAULT_TEXT_COLOR)
    }

    pub fn show_disclaimer(&self) -> bool {
        self.show_disclaimer
    }

    /// Profile for `platform`.
    pub fn social(&self, platform: Platform) -> &SocialProfile {
        // every platform is inserted by `default()` and never removed
        &self.social[&platform]
    }

    /// Whether the office line will be rendered.
    pub fn office_phone_visible(&self) -> bool {
        self.show_office_phone && !self.office_phone.is_empty()
    }

    /// Whether the mobile line will be rendered.
    pub fn mobile_phone_visible(&self) -> bool {
        self.show_mobile_phone && !self.mobile_phone.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn with_full_name(mut self, raw: &str) -> Self {
        self.full_name = sanitize_name_like(raw);
        self
    }

    #[must_use]
    pub fn with_job_title(mut self, raw: &str) -> Self {
        self.job_title = sanitize_name_like(raw);
        self
    }

    #[must_use]
    pub fn with_office_phone(mut self, raw: &str) -> Self {
        self.office_phone = format_phone(raw);
        self
    }

    #[must_use]
    pub fn with_mobile_phone(mut self, raw: &str) -> Self {
        self.mobile_phone = format_phone(raw);
        self
    }

    #[must_use]
    pub fn with_office_phone_shown(mut self, shown: bool) -> Self {
        self.show_office_phone = shown;
        self
    }

    #[must_use]
    pub fn with_mobile_phone_shown(mut self, shown: bool) -> Self {
        self.show_mobile_phone = shown;
        self
    }

    /// Email is free text; it is only ever used inside a `mailto:` link.
    #[must_use]
    pub fn with_email(mut self, raw: &str) -> Self {
        self.email = raw.to_string();
        self
    }

    #[must_use]
    pub fn with_website(mut self, raw: &str) -> Self {
        self.website = raw.to_string();
        self
    }

    #[must_use]
    pub fn with_company_logo(mut self, logo: ImageSource) -> Self {
        self.company_logo = logo;
        self
    }

    /// Apply an edit to the color field. Rejected keystrokes leave it as is.
    #[must_use]
    pub fn with_text_color_input(mut self, raw: &str) -> Self {
        self.text_color = filter_color_input(&self.text_color, raw);
        self
    }

    /// Validate the color field when editing ends.
    ///
    /// An invalid value is replaced by the default color; the error is
    /// returned so the form can display it.
    pub fn commit_text_color(mut self) -> (Self, Result<(), ColorError>) {
        let validation = validate_color_format(&self.text_color);
        if let Err(err) = validation {
            debug!(
                "Rejected color {:?} ({}), resetting to {}",
                self.text_color, err, DEFAULT_TEXT_COLOR
            );
            self.text_color = DEFAULT_TEXT_COLOR.to_string();
        }
        (self, validation)
    }

    #[must_use]
    pub fn with_disclaimer(mut self, shown: bool) -> Self {
        self.show_disclaimer = shown;
        self
    }

    #[must_use]
    pub fn with_social_url(mut self, platform: Platform, raw: &str) -> Self {
        self.social.entry(platform).or_default().url = raw.to_string();
        self
    }

    #[must_use]
    pub fn with_social_enabled(mut self, platform: Platform, enabled: bool) -> Self {
        self.social.entry(platform).or_default().enabled = enabled;
        self
    }

    #[must_use]
    pub fn toggle_social(self, platform: Platform) -> Self {
        let enabled = !self.social(platform).enabled;
        self.with_social_enabled(platform, enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SignatureState::default();
        assert_eq!(state.full_name(), "");
        assert_eq!(state.text_color(), DEFAULT_TEXT_COLOR);
        assert!(state.company_logo().is_placeholder());
        assert!(!state.show_disclaimer());
        for platform in Platform::ALL {
            assert_eq!(state.social(platform), &SocialProfile::default());
        }
    }

    #[test]
    fn test_name_and_title_are_sanitized() {
        let state = SignatureState::default()
            .with_full_name("J0hn D0e!!")
            .with_job_title("Engineer #1");
        assert_eq!(state.full_name(), "Jhn De");
        assert_eq!(state.job_title(), "Engineer ");
    }

    #[test]
    fn test_phones_are_formatted() {
        let state = SignatureState::default()
            .with_office_phone("555.123.4567")
            .with_mobile_phone("555987");
        assert_eq!(state.office_phone(), "(555) 123-4567");
        assert_eq!(state.mobile_phone(), "(555) 987");
    }

    #[test]
    fn test_phone_visibility_needs_flag_and_value() {
        let state = SignatureState::default().with_office_phone_shown(true);
        assert!(!state.office_phone_visible());

        let state = SignatureState::default().with_office_phone("5551234567");
        assert!(!state.office_phone_visible());

        let state = state.with_office_phone_shown(true);
        assert!(state.office_phone_visible());
        assert!(!state.mobile_phone_visible());
    }

    #[test]
    fn test_transitions_leave_original_untouched() {
        let original = SignatureState::default();
        let updated = original.clone().with_full_name("Jane");
        assert_eq!(original.full_name(), "");
        assert_eq!(updated.full_name(), "Jane");
    }

    #[test]
    fn test_color_editing_keeps_partial_text_until_commit() {
        let state = SignatureState::default()
            .with_text_color_input("#")
            .with_text_color_input("12");
        assert_eq!(state.text_color(), "#12");
        assert_eq!(state.resolved_text_color(), DEFAULT_TEXT_COLOR);

        let (state, result) = state.commit_text_color();
        assert_eq!(result, Err(ColorError::InvalidFormat));
        assert_eq!(state.text_color(), DEFAULT_TEXT_COLOR);
    }

    #[test]
    fn test_color_commit_keeps_valid_value() {
        let state = SignatureState::default().with_text_color_input("#112233");
        let (state, result) = state.commit_text_color();
        assert_eq!(result, Ok(()));
        assert_eq!(state.text_color(), "#112233");
        assert_eq!(state.resolved_text_color(), "#112233");
    }

    #[test]
    fn test_clearing_color_field_keeps_previous_value() {
        let state = SignatureState::default()
            .with_text_color_input("#112233")
            .with_text_color_input("");
        assert_eq!(state.text_color(), "#112233");
    }

    #[test]
    fn test_bare_hash_commit_resets_to_default() {
        let (state, result) = SignatureState::default()
            .with_text_color_input("#")
            .commit_text_color();
        assert_eq!(result, Err(ColorError::InvalidFormat));
        assert_eq!(state.text_color(), DEFAULT_TEXT_COLOR);
    }

    #[test]
    fn test_rejected_color_keystroke_is_ignored() {
        let state = SignatureState::default().with_text_color_input("#47403z");
        assert_eq!(state.text_color(), DEFAULT_TEXT_COLOR);
    }

    #[test]
    fn test_social_profiles() {
        let state = SignatureState::default()
            .with_social_url(Platform::X, "https://x.com/jane")
            .toggle_social(Platform::X);
        assert!(state.social(Platform::X).is_visible());

        let state = state.toggle_social(Platform::X);
        assert!(!state.social(Platform::X).is_visible());
        assert_eq!(state.social(Platform::X).url, "https://x.com/jane");

        let state = state.with_social_enabled(Platform::Google, true);
        assert!(!state.social(Platform::Google).is_visible());
    }
}
