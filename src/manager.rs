// src/manager.rs
//! Settings manager — the read/write path every caller goes through
//!
//! Reads are served from the TTL cache when fresh, otherwise from the store
//! (decrypting sensitive values) and then cached. Writes encrypt or normalize
//! the value, upsert it, and drop every cache entry that could now be stale.
//! Data-path failures are logged and surface as `None`, a partial map or a
//! failed [`BulkUpdateOutcome`]; they never propagate as errors.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::cache::{media_cache_key, CachedValue, SettingsCache};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::consts::{ALL_CACHE_KEY, CACHE_TTL_MS, PRESIGNED_URL_TTL_SECS};
use crate::crypto::{self, FieldCipher};
use crate::db::{SettingCreate, SettingUpdate, SettingsStore, SettingsTx};
use crate::enums::SettingCategory;
use crate::error::Result;
use crate::storage::{
    is_http_url, is_media_setting, normalize_media_setting_value, ObjectStorage, StorageEndpoints,
};

/// Confirmation returned by [`SettingsManager::update_setting`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedSetting {
    pub key: String,
    /// Plaintext as persisted (normalized for media settings)
    pub value: String,
    pub category: SettingCategory,
}

/// Result of [`SettingsManager::update_settings`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkUpdateOutcome {
    pub success: bool,
    /// Keys staged successfully
    pub count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

pub struct SettingsManager {
    store: Arc<dyn SettingsStore>,
    storage: Arc<dyn ObjectStorage>,
    cipher: FieldCipher,
    cache: SettingsCache,
    endpoints: StorageEndpoints,
    presign_ttl: Duration,
}

pub struct SettingsManagerBuilder {
    store: Arc<dyn SettingsStore>,
    storage: Arc<dyn ObjectStorage>,
    cipher: FieldCipher,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    endpoints: StorageEndpoints,
    presign_ttl: Duration,
}

impl SettingsManagerBuilder {
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn endpoints(mut self, endpoints: StorageEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub fn presign_ttl(mut self, presign_ttl: Duration) -> Self {
        self.presign_ttl = presign_ttl;
        self
    }

    pub fn build(self) -> SettingsManager {
        SettingsManager {
            store: self.store,
            storage: self.storage,
            cipher: self.cipher,
            cache: SettingsCache::new(self.ttl, self.clock),
            endpoints: self.endpoints,
            presign_ttl: self.presign_ttl,
        }
    }
}

impl SettingsManager {
    pub fn builder(
        store: Arc<dyn SettingsStore>,
        storage: Arc<dyn ObjectStorage>,
        cipher: FieldCipher,
    ) -> SettingsManagerBuilder {
        SettingsManagerBuilder {
            store,
            storage,
            cipher,
            clock: Arc::new(SystemClock),
            ttl: Duration::from_millis(CACHE_TTL_MS),
            endpoints: StorageEndpoints::default(),
            presign_ttl: Duration::from_secs(PRESIGNED_URL_TTL_SECS),
        }
    }

    /// Wire a manager from config.
    ///
    /// Fails with [`crate::SettingsError::Config`] when the encryption key is
    /// missing or malformed; that error is meant to stop startup.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn SettingsStore>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Result<Self> {
        let cipher = FieldCipher::from_config(&config.encryption)?;
        Ok(Self::builder(store, storage, cipher)
            .ttl(config.cache.ttl())
            .endpoints(StorageEndpoints::from_config(&config.storage))
            .presign_ttl(config.storage.presign_ttl())
            .build())
    }

    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    pub fn cache(&self) -> &SettingsCache {
        &self.cache
    }

    /// Decrypted value of one setting; `None` if absent or unreadable.
    ///
    /// Absence is not cached, so a later write shows up immediately.
    pub fn get_setting(&self, key: &str) -> Option<String> {
        if let Some(value) = self.cache.get_single(key) {
            return Some(value);
        }

        let record = match self.store.find_unique(key) {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(err) => {
                error!(key, error = %err, "failed to read setting");
                return None;
            }
        };

        let value = if crypto::is_sensitive_field(key) {
            match self.cipher.decrypt(&record.value) {
                Ok(plain) => plain,
                Err(err) => {
                    error!(key, error = %err, "failed to decrypt setting");
                    return None;
                }
            }
        } else {
            record.value
        };

        self.cache.insert(key, CachedValue::Single(value.clone()));
        Some(value)
    }

    /// Key → decrypted value for `category`, or for every setting when `None`.
    ///
    /// A sensitive value that fails to decrypt is left out; the rest are
    /// still returned.
    pub fn get_settings(&self, category: Option<SettingCategory>) -> BTreeMap<String, String> {
        let cache_key = category.map_or(ALL_CACHE_KEY, |c| c.as_str());
        if let Some(map) = self.cache.get_map(cache_key) {
            return (*map).clone();
        }

        let records = match self.store.find_many(category) {
            Ok(records) => records,
            Err(err) => {
                error!(scope = cache_key, error = %err, "failed to read settings");
                return BTreeMap::new();
            }
        };

        let mut map = BTreeMap::new();
        for record in records {
            if crypto::is_sensitive_field(&record.key) {
                match self.cipher.decrypt(&record.value) {
                    Ok(plain) => {
                        map.insert(record.key, plain);
                    }
                    Err(err) => {
                        warn!(key = %record.key, error = %err, "skipping undecryptable setting");
                    }
                }
            } else {
                map.insert(record.key, record.value);
            }
        }

        self.cache
            .insert(cache_key, CachedValue::Map(Arc::new(map.clone())));
        map
    }

    /// Value as it should be persisted: encrypted, normalized or untouched
    fn prepare_value(&self, key: &str, value: &str) -> String {
        if crypto::is_sensitive_field(key) {
            self.cipher.encrypt(value)
        } else if is_media_setting(key) {
            normalize_media_setting_value(value, &self.endpoints, self.storage.as_ref())
        } else {
            value.to_string()
        }
    }

    /// Create or update one setting.
    ///
    /// New keys take `category` (default GENERAL); existing keys keep theirs.
    /// Returns `None` if the store write fails.
    pub fn update_setting(
        &self,
        key: &str,
        value: &str,
        actor: Option<&str>,
        category: Option<SettingCategory>,
    ) -> Option<UpdatedSetting> {
        let stored = self.prepare_value(key, value);
        let create = SettingCreate {
            value: &stored,
            category: category.unwrap_or_default(),
            updated_by: actor,
        };
        let update = SettingUpdate {
            value: &stored,
            updated_by: actor,
        };

        let record = match self.store.upsert(key, &create, &update) {
            Ok(record) => record,
            Err(err) => {
                error!(key, error = %err, "failed to update setting");
                return None;
            }
        };

        self.cache.invalidate(key);
        self.cache.invalidate(&media_cache_key(key));
        self.cache.invalidate(record.category.as_str());
        self.cache.invalidate(ALL_CACHE_KEY);
        debug!(key, category = %record.category, "setting updated");

        let value = if crypto::is_sensitive_field(key) {
            value.to_string()
        } else {
            stored
        };
        Some(UpdatedSetting {
            key: key.to_string(),
            value,
            category: record.category,
        })
    }

    /// Apply every pair inside one store transaction, then clear the whole cache.
    ///
    /// A failing key is recorded in `errors` and the loop moves on.
    pub fn update_settings<'a, I>(&self, updates: I, actor: Option<&str>) -> BulkUpdateOutcome
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let updates: Vec<(&String, &String)> = updates.into_iter().collect();
        let mut count = 0;
        let mut errors = Vec::new();

        let result = self.store.transaction(&mut |tx: &dyn SettingsTx| -> Result<()> {
            count = 0;
            errors.clear();
            for (key, value) in &updates {
                let stored = self.prepare_value(key, value);
                let outcome = tx.find_unique(key).and_then(|existing| {
                    let category = existing.map(|r| r.category).unwrap_or_default();
                    tx.upsert(
                        key,
                        &SettingCreate {
                            value: &stored,
                            category,
                            updated_by: actor,
                        },
                        &SettingUpdate {
                            value: &stored,
                            updated_by: actor,
                        },
                    )
                });
                match outcome {
                    Ok(_) => count += 1,
                    Err(err) => {
                        warn!(key = %key, error = %err, "bulk update failed for key");
                        errors.push(format!("{key}: {err}"));
                    }
                }
            }
            Ok(())
        });

        if let Err(err) = result {
            error!(error = %err, "bulk settings transaction failed");
            count = 0;
            errors.push(format!("transaction failed: {err}"));
        }

        self.clear_cache();
        info!(count, failed = errors.len(), "bulk settings update applied");

        BulkUpdateOutcome {
            success: errors.is_empty(),
            count,
            errors,
        }
    }

    /// Displayable URL for a media setting, read from the store.
    pub fn get_media_setting_url(&self, key: &str) -> Option<String> {
        self.resolve_media_url(key, None)
    }

    /// Same as [`Self::get_media_setting_url`] but resolves `raw` instead of
    /// reading the stored value; `None` means the value is absent.
    pub fn get_media_setting_url_with(&self, key: &str, raw: Option<&str>) -> Option<String> {
        self.resolve_media_url(key, Some(raw))
    }

    fn resolve_media_url(&self, key: &str, raw_override: Option<Option<&str>>) -> Option<String> {
        if let Some(cached) = self.cache.get_media(key) {
            return cached;
        }

        let raw = match raw_override {
            Some(raw) => raw.map(str::to_string),
            None => self.get_setting(key),
        };
        let normalized = raw
            .map(|v| normalize_media_setting_value(&v, &self.endpoints, self.storage.as_ref()))
            .unwrap_or_default();

        let resolved = if normalized.is_empty() {
            None
        } else if is_http_url(&normalized) {
            // Internal URLs were reduced to keys above; what is left is external
            match url::Url::parse(&normalized) {
                Ok(url) if self.endpoints.contains(&url) => {
                    warn!(key, "internal media URL without an object key");
                    None
                }
                _ => Some(normalized),
            }
        } else {
            match self.storage.presigned_url(&normalized, self.presign_ttl) {
                Ok(url) => Some(url),
                Err(err) => {
                    error!(key, error = %err, "failed to sign media URL");
                    None
                }
            }
        };

        self.cache.insert_media(key, resolved.clone());
        resolved
    }

    /// Drop every cache entry
    pub fn clear_cache(&self) {
        self.cache.clear();
        debug!("settings cache cleared");
    }

    pub fn is_sensitive_field(&self, key: &str) -> bool {
        crypto::is_sensitive_field(key)
    }

    pub fn sensitive_fields(&self) -> Vec<&'static str> {
        crypto::sensitive_fields()
    }
}

impl std::fmt::Debug for SettingsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsManager")
            .field("cache", &self.cache)
            .field("endpoints", &self.endpoints)
            .field("presign_ttl", &self.presign_ttl)
            .finish_non_exhaustive()
    }
}

static GLOBAL: OnceLock<SettingsManager> = OnceLock::new();

/// Make `manager` the process-wide instance; hands it back if one is already set
pub fn install_global(manager: SettingsManager) -> std::result::Result<(), SettingsManager> {
    GLOBAL.set(manager)
}

/// The instance registered with [`install_global`], if any
pub fn global() -> Option<&'static SettingsManager> {
    GLOBAL.get()
}
