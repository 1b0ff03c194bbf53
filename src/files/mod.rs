//! File operations module for Signet
//!
//! This module provides the native dialogs used to pick images and choose
//! an export location.

pub mod dialogs;
