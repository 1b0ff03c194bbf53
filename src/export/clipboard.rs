//! Clipboard operations for the signature
//!
//! Cross-platform clipboard access through the arboard crate. Outlook's
//! signature editor only keeps formatting when it receives the HTML
//! clipboard flavor, so that is the default.

#![allow(clippy::enum_variant_names)]

use crate::config::ClipboardFormat;
use crate::signature::Fragment;
use arboard::Clipboard;
use log::info;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::WriteError(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Payload
// ─────────────────────────────────────────────────────────────────────────────

/// What will be written to the clipboard for a given format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    /// HTML flavor plus a plain-text alternative
    Html { html: String, alt_text: String },
    /// Plain text only
    Text(String),
}

impl ClipboardPayload {
    /// Build the payload for `fragment`. Both variants carry the export
    /// serialization, never the preview one.
    pub fn for_fragment(fragment: &Fragment, format: ClipboardFormat) -> Self {
        match format {
            ClipboardFormat::RichHtml => ClipboardPayload::Html {
                html: fragment.export_html(),
                alt_text: fragment.to_plain_text(),
            },
            ClipboardFormat::HtmlSource => ClipboardPayload::Text(fragment.export_html()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Copy the signature to the system clipboard in the requested format.
pub fn copy_signature_to_clipboard(
    fragment: &Fragment,
    format: ClipboardFormat,
) -> Result<(), ClipboardError> {
    match ClipboardPayload::for_fragment(fragment, format) {
        ClipboardPayload::Html { html, alt_text } => copy_html_with_fallback(&html, &alt_text)?,
        ClipboardPayload::Text(text) => copy_text_to_clipboard(&text)?,
    }
    info!("Signature copied to clipboard ({})", format.label());
    Ok(())
}

/// Copy plain text to clipboard.
pub fn copy_text_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::WriteError(e.to_string()))?;

    Ok(())
}

/// Copy HTML with plain text fallback to clipboard.
pub fn copy_html_with_fallback(html: &str, plain_text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

    clipboard
        .set_html(html, Some(plain_text))
        .map_err(|e| ClipboardError::WriteError(e.to_string()))?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{render, IconSet, RenderConfig, SignatureState};

    fn sample_fragment() -> Fragment {
        let state = SignatureState::default()
            .with_full_name("Jane Doe")
            .with_job_title("Engineer");
        render(&state, &IconSet::default(), &RenderConfig::default())
    }

    #[test]
    fn test_clipboard_error_display() {
        let err = ClipboardError::AccessError("test".to_string());
        assert!(err.to_string().contains("test"));
        let err = ClipboardError::WriteError("write failed".to_string());
        assert!(err.to_string().contains("write failed"));
    }

    #[test]
    fn test_rich_payload_has_html_and_text() {
        let fragment = sample_fragment();
        match ClipboardPayload::for_fragment(&fragment, ClipboardFormat::RichHtml) {
            ClipboardPayload::Html { html, alt_text } => {
                assert_eq!(html, fragment.export_html());
                assert!(!html.contains("signature-preview"));
                assert!(alt_text.contains("Jane Doe"));
                assert!(!alt_text.contains('<'));
            }
            other => panic!("Expected Html payload, got {:?}", other),
        }
    }

    #[test]
    fn test_source_payload_is_export_html() {
        let fragment = sample_fragment();
        assert_eq!(
            ClipboardPayload::for_fragment(&fragment, ClipboardFormat::HtmlSource),
            ClipboardPayload::Text(fragment.export_html())
        );
    }

    // Note: Actual clipboard tests require a display/clipboard context
    // which isn't typically available in CI environments.
}
