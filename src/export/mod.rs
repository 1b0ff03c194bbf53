//! Signature export for Signet
//!
//! # Supported Export Targets
//!
//! - **Clipboard**: rich HTML with a plain-text alternative, or the HTML
//!   source as text
//! - **HTML File**: a minimal standalone document around the signature
//!
//! # Architecture
//!
//! - `html.rs` - standalone document generation and file writing
//! - `clipboard.rs` - platform clipboard operations

pub mod clipboard;
pub mod html;

pub use clipboard::copy_signature_to_clipboard;
pub use html::export_to_html_file;
