// src/db/mod.rs
//! Persistent settings store
//!
//! The manager only talks to [`SettingsStore`]; [`SqliteSettingsStore`] is
//! the production implementation.

mod settings_db_conn;
mod settings_db_ops;

pub use settings_db_conn::{open_settings_db_at, SETTINGS_SCHEMA};
pub use settings_db_ops::SqliteSettingsStore;

use crate::enums::SettingCategory;
use crate::error::Result;

/// One persisted setting; `value` may be ciphertext for sensitive keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRecord {
    pub key: String,
    pub value: String,
    pub category: SettingCategory,
    pub updated_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields used when the key does not exist yet
#[derive(Debug, Clone)]
pub struct SettingCreate<'a> {
    pub value: &'a str,
    pub category: SettingCategory,
    pub updated_by: Option<&'a str>,
}

/// Fields changed when the key already exists; category is never touched
#[derive(Debug, Clone)]
pub struct SettingUpdate<'a> {
    pub value: &'a str,
    pub updated_by: Option<&'a str>,
}

/// Operations available inside a bulk transaction
pub trait SettingsTx {
    fn find_unique(&self, key: &str) -> Result<Option<SettingRecord>>;
    fn upsert(
        &self,
        key: &str,
        create: &SettingCreate<'_>,
        update: &SettingUpdate<'_>,
    ) -> Result<SettingRecord>;
}

/// Source of truth for settings
pub trait SettingsStore: Send + Sync {
    fn find_unique(&self, key: &str) -> Result<Option<SettingRecord>>;

    /// All settings, or only those in `category`, ordered by key
    fn find_many(&self, category: Option<SettingCategory>) -> Result<Vec<SettingRecord>>;

    fn upsert(
        &self,
        key: &str,
        create: &SettingCreate<'_>,
        update: &SettingUpdate<'_>,
    ) -> Result<SettingRecord>;

    /// Run `work` inside one transaction.
    ///
    /// `Ok` from `work` commits everything it staged; `Err` rolls back.
    fn transaction(&self, work: &mut dyn FnMut(&dyn SettingsTx) -> Result<()>) -> Result<()>;
}
