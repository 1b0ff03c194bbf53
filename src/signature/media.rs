//! Image references for the logo and social icons
//!
//! The markup treats every image as an opaque `src` string. This module owns
//! the three kinds of reference the tool produces: the relative placeholder
//! shown before a logo is chosen, remote CDN URLs (the default icon sets) and
//! uploaded files embedded as `data:` URLs.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Source used when an image reference is empty.
pub const PLACEHOLDER_SRC: &str = "/placeholder.svg";

/// Recommended logo dimensions, carried by the default placeholder.
pub const LOGO_PLACEHOLDER_WIDTH: u32 = 180;
pub const LOGO_PLACEHOLDER_HEIGHT: u32 = 60;

/// An image reference as it will appear in the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Relative placeholder path with semantic dimensions
    Placeholder { width: u32, height: u32 },
    /// Remote image URL
    Remote(String),
    /// Uploaded file embedded inline
    Embedded {
        /// MIME type, e.g. `image/png`
        mime: String,
        /// Base64 payload
        data: String,
    },
}

impl ImageSource {
    /// The default company logo placeholder (180×60).
    pub fn logo_placeholder() -> Self {
        ImageSource::Placeholder {
            width: LOGO_PLACEHOLDER_WIDTH,
            height: LOGO_PLACEHOLDER_HEIGHT,
        }
    }

    /// Create a remote reference.
    pub fn remote(url: impl Into<String>) -> Self {
        ImageSource::Remote(url.into())
    }

    /// Render the reference as an `src` attribute value.
    pub fn src(&self) -> String {
        match self {
            ImageSource::Placeholder { width, height } => {
                format!("{}?height={}&width={}", PLACEHOLDER_SRC, height, width)
            }
            ImageSource::Remote(url) if url.trim().is_empty() => PLACEHOLDER_SRC.to_string(),
            ImageSource::Remote(url) => url.clone(),
            ImageSource::Embedded { mime, data } => format!("data:{};base64,{}", mime, data),
        }
    }

    /// Returns `true` for the placeholder variant.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder { .. })
    }

    /// Short human label for the form ("Uploaded image (image/png)", ...).
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Placeholder { width, height } => {
                format!("Placeholder ({}×{})", width, height)
            }
            ImageSource::Remote(url) => url.clone(),
            ImageSource::Embedded { mime, .. } => format!("Uploaded image ({})", mime),
        }
    }

    /// Embed raw file bytes, detecting the image format.
    ///
    /// `name_hint` is the file name; it is only consulted for SVG, which has
    /// no magic number. Returns `None` when the bytes are not a known image.
    pub fn from_bytes(bytes: &[u8], name_hint: &str) -> Option<Self> {
        let mime = match image::guess_format(bytes) {
            Ok(format) => format.to_mime_type().to_string(),
            Err(_) if is_svg_name(name_hint) => "image/svg+xml".to_string(),
            Err(_) => return None,
        };

        Some(ImageSource::Embedded {
            mime,
            data: STANDARD.encode(bytes),
        })
    }
}

impl Default for ImageSource {
    fn default() -> Self {
        Self::logo_placeholder()
    }
}

fn is_svg_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Read an image file once and embed it as a `data:` reference.
///
/// # Errors
///
/// - `Error::ImageTooLarge` if the file is bigger than `max_bytes`
/// - `Error::ImageRead` if the file cannot be read
/// - `Error::UnsupportedImage` if the contents are not a recognised image
pub fn load_image_file(path: &Path, max_bytes: u64) -> Result<ImageSource> {
    let size = fs::metadata(path)
        .map_err(|e| Error::ImageRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();

    if size > max_bytes {
        return Err(Error::ImageTooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_bytes,
        });
    }

    let bytes = fs::read(path).map_err(|e| Error::ImageRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let source = ImageSource::from_bytes(&bytes, name).ok_or_else(|| Error::UnsupportedImage {
        path: path.to_path_buf(),
    })?;

    debug!("Embedded {} ({} bytes)", path.display(), bytes.len());
    info!("Loaded image {}", path.display());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Smallest valid PNG signature plus IHDR chunk start.
    const PNG_HEADER: &[u8] = &[
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
        b'R',
    ];

    #[test]
    fn test_placeholder_src() {
        assert_eq!(
            ImageSource::logo_placeholder().src(),
            "/placeholder.svg?height=60&width=180"
        );
    }

    #[test]
    fn test_empty_remote_falls_back_to_placeholder() {
        assert_eq!(ImageSource::remote("").src(), PLACEHOLDER_SRC);
        assert_eq!(
            ImageSource::remote("https://cdn.example/x.png").src(),
            "https://cdn.example/x.png"
        );
    }

    #[test]
    fn test_from_bytes_detects_png() {
        let source = ImageSource::from_bytes(PNG_HEADER, "logo.png").unwrap();
        match &source {
            ImageSource::Embedded { mime, .. } => assert_eq!(mime, "image/png"),
            other => panic!("expected embedded image, got {:?}", other),
        }
        assert!(source.src().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_from_bytes_svg_by_extension() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
        let source = ImageSource::from_bytes(svg, "Logo.SVG").unwrap();
        assert!(source.src().starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_from_bytes_rejects_text() {
        assert!(ImageSource::from_bytes(b"hello world", "notes.txt").is_none());
    }

    #[test]
    fn test_load_image_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        fs::write(&path, PNG_HEADER).unwrap();

        let source = load_image_file(&path, 1024).unwrap();
        assert!(matches!(source, ImageSource::Embedded { .. }));
    }

    #[test]
    fn test_load_image_file_enforces_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        fs::write(&path, PNG_HEADER).unwrap();

        let err = load_image_file(&path, 4).unwrap_err();
        assert!(matches!(err, Error::ImageTooLarge { size: 16, limit: 4, .. }));
    }

    #[test]
    fn test_load_image_file_missing_and_unsupported() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.png");
        assert!(matches!(
            load_image_file(&missing, 1024),
            Err(Error::ImageRead { .. })
        ));

        let text = dir.path().join("notes.txt");
        fs::write(&text, "not an image").unwrap();
        assert!(matches!(
            load_image_file(&text, 1024),
            Err(Error::UnsupportedImage { .. })
        ));
    }
}
