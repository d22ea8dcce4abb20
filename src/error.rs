// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// Deployment misconfiguration, e.g. a missing or malformed encryption key.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Crypto operation failed: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("Unknown setting category: {0}")]
    UnknownCategory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
