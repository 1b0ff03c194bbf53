//! Native file dialog integration using the rfd crate
//!
//! This module provides the pickers for uploading a logo or icon image and
//! for choosing where to save the exported HTML.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// File extension filters for supported file types.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Opens a native file dialog for selecting an image to embed.
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
pub fn open_image_dialog(initial_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Choose Image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Opens a native save dialog for the exported HTML signature.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn save_html_dialog(initial_dir: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Signature as HTML")
        .add_filter("HTML Files", HTML_EXTENSIONS)
        .set_file_name(default_name);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}

/// Suggested file name for the exported signature, derived from the name field.
pub fn default_export_file_name(full_name: &str) -> String {
    let slug: Vec<String> = full_name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect();

    if slug.is_empty() {
        "signature.html".to_string()
    } else {
        format!("{}-signature.html", slug.join("-"))
    }
}
