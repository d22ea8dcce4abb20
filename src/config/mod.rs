// src/config/mod.rs
//! Configuration system for showcase-settings
//!
//! Central, lazy-loaded global config with TOML + env overrides.
//! `Config::from_toml_str` builds one explicitly for injection and tests.

pub use app::{load, CacheSection, Config, DatabaseSection, EncryptionSection, StorageSection};

mod app;
mod defaults;
