//! UI components for Signet
//!
//! Thin egui widgets around the signature core. None of them own the
//! signature; they read it and report actions back to the app.

mod form;
mod icon_picker;
mod instructions;
mod preview;

pub use form::{apply_action, FormAction, FormEffect, SignatureForm};
pub use icon_picker::{IconPicker, IconPickerOutput};
pub use instructions::show_instructions;
pub use preview::SignaturePreview;
