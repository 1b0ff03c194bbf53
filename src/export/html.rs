//! HTML file export
//!
//! Wraps an exported signature fragment in a minimal standalone document so
//! it can be opened in a browser or imported into a mail client. The
//! document carries no stylesheet: every style in the signature is inline.

use crate::error::{Error, Result};
use crate::signature::Fragment;
use log::info;
use std::path::Path;

/// Title used when the caller has nothing better.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Email Signature";

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document around the exported fragment.
///
/// The body is exactly `fragment.export_html()`, with no preview ids.
pub fn generate_html_document(fragment: &Fragment, title: Option<&str>) -> String {
    let doc_title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_DOCUMENT_TITLE);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="generator" content="Signet">
    <title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = html_escape(doc_title),
        body = fragment.export_html(),
    )
}

/// Write the signature as a standalone HTML document.
///
/// The document title is taken from the output file stem.
pub fn export_to_html_file(fragment: &Fragment, output_path: &Path) -> Result<()> {
    let title = output_path.file_stem().and_then(|s| s.to_str());
    let html = generate_html_document(fragment, title);

    std::fs::write(output_path, html).map_err(|source| Error::ExportWrite {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!("Exported signature to {}", output_path.display());
    Ok(())
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{render, IconSet, RenderConfig, SignatureState};
    use tempfile::TempDir;

    fn sample_fragment() -> Fragment {
        let state = SignatureState::default()
            .with_full_name("Jane Doe")
            .with_email("jane@example.com");
        render(&state, &IconSet::default(), &RenderConfig::default())
    }

    #[test]
    fn test_generate_html_document() {
        let fragment = sample_fragment();
        let html = generate_html_document(&fragment, Some("Jane"));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Jane</title>"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains(&fragment.export_html()));
        assert!(!html.contains("<style"));
        assert!(!html.contains("signature-preview"));
    }

    #[test]
    fn test_blank_title_falls_back() {
        let html = generate_html_document(&sample_fragment(), Some("  "));
        assert!(html.contains("<title>Email Signature</title>"));
        let html = generate_html_document(&sample_fragment(), None);
        assert!(html.contains("<title>Email Signature</title>"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Hello"), "Hello");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_export_to_html_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jane-signature.html");

        export_to_html_file(&sample_fragment(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<title>jane-signature</title>"));
        assert!(written.contains("Jane Doe"));
        assert!(written.contains("mailto:jane@example.com"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.html");

        let err = export_to_html_file(&sample_fragment(), &path).unwrap_err();
        assert!(matches!(err, Error::ExportWrite { .. }));
    }
}
