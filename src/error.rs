//! Centralized error handling for Signet
//!
//! The signature core never fails. Errors only come from the edges: reading
//! an uploaded image, writing an exported file, and the preferences file.
//! Each variant keeps the path involved so the toast can name it.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong outside the signature core.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Uploads and exports
    // ─────────────────────────────────────────────────────────────────────────
    /// An uploaded image could not be read
    ImageRead { path: PathBuf, source: io::Error },

    /// The file is not a format that can be embedded
    UnsupportedImage { path: PathBuf },

    /// The file is above the configured embedding limit (both in bytes)
    ImageTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    /// The exported HTML file could not be written
    ExportWrite { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────────────────────
    /// The platform has no config directory
    NoConfigDir,

    /// The preferences file exists but could not be read
    ConfigLoad { path: PathBuf, source: io::Error },

    /// The preferences file is not valid JSON for `Settings`
    ConfigParse {
        message: String,
        source: serde_json::Error,
    },

    /// The preferences could not be serialized or written
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: err,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ImageRead { path, source } => {
                write!(f, "Cannot read '{}': {}", path.display(), source)
            }
            Error::UnsupportedImage { path } => {
                write!(f, "'{}' is not a supported image", path.display())
            }
            Error::ImageTooLarge { path, size, limit } => write!(
                f,
                "'{}' is {} KB, larger than the {} KB limit",
                path.display(),
                size / 1024,
                limit / 1024
            ),
            Error::ExportWrite { path, source } => {
                write!(f, "Cannot write '{}': {}", path.display(), source)
            }

            Error::NoConfigDir => write!(f, "No configuration directory on this system"),
            Error::ConfigLoad { path, source } => {
                write!(f, "Cannot read preferences '{}': {}", path.display(), source)
            }
            Error::ConfigParse { message, .. } => write!(f, "Invalid preferences: {}", message),
            Error::ConfigSave { path, source } => {
                write!(f, "Cannot save preferences '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ImageRead { source, .. }
            | Error::ExportWrite { source, .. }
            | Error::ConfigLoad { source, .. } => Some(source),
            Error::ConfigParse { source, .. } => Some(source),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::UnsupportedImage { .. } | Error::ImageTooLarge { .. } | Error::NoConfigDir => {
                None
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation
// ─────────────────────────────────────────────────────────────────────────────

/// Fall back to a default instead of failing.
pub trait ResultExt<T> {
    /// Return the value, or log the error with `context` and return `default`.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        self.unwrap_or_else(|err| {
            warn!("{}: {}. Using default.", context, err);
            default
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_image_read_names_the_file() {
        let err = Error::ImageRead {
            path: PathBuf::from("/tmp/logo.png"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("logo.png"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_image_too_large_display_in_kb() {
        let err = Error::ImageTooLarge {
            path: PathBuf::from("big.png"),
            size: 2048 * 1024,
            limit: 512 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "'big.png' is 2048 KB, larger than the 512 KB limit"
        );
    }

    #[test]
    fn test_unsupported_image_display() {
        let err = Error::UnsupportedImage {
            path: PathBuf::from("notes.txt"),
        };
        assert_eq!(err.to_string(), "'notes.txt' is not a supported image");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<String>("invalid json").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_chain() {
        let err = Error::ExportWrite {
            path: PathBuf::from("out.html"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(Error::NoConfigDir.source().is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.unwrap_or_warn_default(0, "ctx"), 42);

        let err: Result<i32> = Err(Error::NoConfigDir);
        assert_eq!(err.unwrap_or_warn_default(7, "ctx"), 7);
    }
}
