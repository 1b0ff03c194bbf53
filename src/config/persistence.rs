//! Preferences file storage for Signet
//!
//! Preferences live in a single `config.json` inside the platform config
//! directory. A [`ConfigStore`] points at that directory; tests point it at a
//! temporary one instead. Only preferences are stored here, never the
//! signature being edited.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory
const APP_DIR_NAME: &str = "signet";

const CONFIG_FILE_NAME: &str = "config.json";

/// Written first, then renamed over `config.json`
const CONFIG_TEMP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

/// Location of the preferences file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at an explicit directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform config directory
    /// (`%APPDATA%\signet`, `~/Library/Application Support/signet`,
    /// `~/.config/signet`).
    pub fn locate() -> Result<Self> {
        dirs::config_dir()
            .map(|base| Self::new(base.join(APP_DIR_NAME)))
            .ok_or(Error::NoConfigDir)
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Read the preferences.
    ///
    /// A missing or blank file yields the defaults. Unparseable content is an
    /// `Error::ConfigParse`; the caller decides whether to fall back.
    pub fn load(&self) -> Result<Settings> {
        let path = self.file_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preferences at {}, using defaults", path.display());
                return Ok(Settings::default());
            }
            Err(e) => return Err(Error::ConfigLoad { path, source: e }),
        };

        if contents.trim().is_empty() {
            debug!("Preferences file {} is blank, using defaults", path.display());
            return Ok(Settings::default());
        }

        debug!("Parsing preferences from {}", path.display());
        let settings = Settings::from_json_sanitized(&contents)?;

        info!("Loaded preferences from {}", path.display());
        Ok(settings)
    }

    /// Write the preferences, creating the directory when needed.
    ///
    /// The JSON goes to a temporary file that is then renamed over
    /// `config.json`, so a reader never sees a half-written file.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let save_error = |path: &Path| {
            let path = path.to_path_buf();
            move |e: std::io::Error| Error::ConfigSave {
                path,
                source: Box::new(e),
            }
        };

        fs::create_dir_all(&self.dir).map_err(save_error(&self.dir))?;

        let target = self.file_path();
        let temp = self.dir.join(CONFIG_TEMP_NAME);
        let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
            path: target.clone(),
            source: Box::new(e),
        })?;

        fs::write(&temp, json).map_err(save_error(&temp))?;
        fs::rename(&temp, &target).map_err(save_error(&target))?;

        debug!("Saved preferences to {}", target.display());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Default-location helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Preferences from the platform config directory, or the defaults if they
/// cannot be read.
pub fn load_config() -> Settings {
    ConfigStore::locate()
        .and_then(|store| store.load())
        .unwrap_or_warn_default(Settings::default(), "Failed to load preferences")
}

/// Save to the platform config directory. Returns `false` (after logging)
/// on failure.
pub fn save_config_silent(settings: &Settings) -> bool {
    match ConfigStore::locate().and_then(|store| store.save(settings)) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save preferences: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClipboardFormat, Theme};
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, ConfigStore) {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join(APP_DIR_NAME));
        (temp, store)
    }

    fn write_raw(store: &ConfigStore, content: &str) {
        fs::create_dir_all(&store.dir).unwrap();
        fs::write(store.file_path(), content).unwrap();
    }

    #[test]
    fn test_locate_uses_app_dir() {
        if let Ok(store) = ConfigStore::locate() {
            assert!(store
                .file_path()
                .ends_with(Path::new(APP_DIR_NAME).join(CONFIG_FILE_NAME)));
        }
    }

    #[test]
    fn test_missing_and_blank_files_give_defaults() {
        let (_temp, store) = temp_store();
        assert_eq!(store.load().unwrap(), Settings::default());

        write_raw(&store, "  \n");
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_corrupted_file_is_parse_error() {
        let (_temp, store) = temp_store();
        write_raw(&store, "{ invalid json }");
        assert!(matches!(store.load(), Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_load_sanitizes_and_ignores_unknown_fields() {
        let (_temp, store) = temp_store();
        write_raw(
            &store,
            r#"{"theme": "dark", "max_image_size_kb": 0, "future": true}"#,
        );
        let settings = store.load().unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.max_image_size_kb, Settings::MIN_IMAGE_SIZE_KB);
    }

    #[test]
    fn test_wrong_types_fail() {
        let (_temp, store) = temp_store();
        write_raw(&store, r#"{"max_image_size_kb": "lots"}"#);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_save_creates_dir_and_reloads() {
        let (_temp, store) = temp_store();
        let original = Settings {
            theme: Theme::System,
            clipboard_format: ClipboardFormat::HtmlSource,
            max_image_size_kb: 256,
            last_export_directory: Some(PathBuf::from("/tmp/out")),
            ..Settings::default()
        };

        store.save(&original).unwrap();
        assert!(store.file_path().exists());
        assert!(!store.dir.join(CONFIG_TEMP_NAME).exists());
        assert_eq!(store.load().unwrap(), original);
    }

    #[test]
    fn test_save_overwrites_previous_file() {
        let (_temp, store) = temp_store();
        store.save(&Settings::default()).unwrap();

        let dark = Settings {
            theme: Theme::Dark,
            ..Settings::default()
        };
        store.save(&dark).unwrap();
        assert_eq!(store.load().unwrap().theme, Theme::Dark);
    }
}
