//! Signature core for Signet
//!
//! Everything that decides what the signature looks like lives here and is
//! free of UI and I/O concerns (apart from reading an uploaded image).
//!
//! # Architecture
//!
//! - `sanitize.rs` - name and phone field filters
//! - `color.rs` - accent color filtering and validation
//! - `media.rs` - logo and icon image references, upload embedding
//! - `platform.rs` - social platforms and their icon sets
//! - `state.rs` - the form state and its transitions
//! - `markup.rs` - inline-styled HTML tree and serialization
//! - `projector.rs` - state to markup projection
//!
//! Data flows one way: raw input → sanitizer → `SignatureState` →
//! `render` → `Fragment` → preview / clipboard / file.

pub mod color;
pub mod markup;
pub mod media;
pub mod platform;
pub mod projector;
pub mod sanitize;
pub mod state;

pub use color::{ColorError, DEFAULT_TEXT_COLOR};
pub use markup::{Element, Fragment, Node, Tag};
pub use media::{load_image_file, ImageSource};
pub use platform::{IconSet, Platform};
pub use projector::{render, RenderConfig};
pub use state::SignatureState;
