// src/lib.rs
//! showcase-settings — cached, field-encrypted settings for a storefront CMS
//!
//! Features:
//! - Read-through TTL cache keyed by setting, category and "all"
//! - AES-256-CBC encryption of sensitive fields at rest
//! - Portable object-storage keys for media settings, resolved to presigned URLs
//! - SQLite-backed persistent store with transactional bulk updates

pub mod aliases;
pub mod cache;
pub mod clock;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod enums;
pub mod error;
pub mod export;
pub mod manager;
pub mod storage;

// Re-export everything callers need at the crate root
pub use aliases::SettingsKey32;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{load as load_config, Config};
pub use crypto::{is_sensitive_field, sensitive_fields, FieldCipher};
pub use db::{SettingRecord, SettingsStore, SqliteSettingsStore};
pub use enums::SettingCategory;
pub use error::{Result, SettingsError};
pub use export::export_settings_json;
pub use manager::{global, install_global, BulkUpdateOutcome, SettingsManager, UpdatedSetting};
pub use storage::{normalize_media_setting_value, ObjectStorage};
