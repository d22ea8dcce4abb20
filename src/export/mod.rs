// src/export/mod.rs
//! Export utilities for showcase-settings
//!
//! Sensitive values are never written out; they are replaced by a marker.

pub use json::{export_settings_json, settings_snapshot};

pub mod json;
