// src/cache/ttl_cache.rs
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tracing::trace;

use super::{CacheEntry, CachedValue};
use crate::clock::Clock;
use crate::consts::MEDIA_CACHE_PREFIX;

/// `media:<key>`
pub fn media_cache_key(key: &str) -> String {
    format!("{MEDIA_CACHE_PREFIX}{key}")
}

/// Process-wide cache shared by every caller of one manager.
///
/// The lock only guards individual map operations. Two concurrent misses for
/// the same key may both populate the slot; the later write wins and both
/// carry the same store-derived value.
pub struct SettingsCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SettingsCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh entry for `key`, or `None` if absent or expired
    pub fn get(&self, key: &str) -> Option<CachedValue> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;
        if entry.is_fresh(self.clock.now(), self.ttl) {
            trace!(key, "cache hit");
            Some(entry.data.clone())
        } else {
            trace!(key, "cache entry expired");
            None
        }
    }

    pub fn get_single(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            CachedValue::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_map(&self, key: &str) -> Option<Arc<BTreeMap<String, String>>> {
        match self.get(key)? {
            CachedValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Outer `None` is a miss; inner `None` is a cached failed resolution
    pub fn get_media(&self, key: &str) -> Option<Option<String>> {
        match self.get(&media_cache_key(key))? {
            CachedValue::MediaUrl(url) => Some(url),
            _ => None,
        }
    }

    pub fn insert(&self, key: impl Into<String>, data: CachedValue) {
        let entry = CacheEntry::new(data, self.clock.now());
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), entry);
    }

    pub fn insert_media(&self, key: &str, url: Option<String>) {
        self.insert(media_cache_key(key), CachedValue::MediaUrl(url));
    }

    pub fn invalidate(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Physical entry count, stale entries included
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for SettingsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsCache")
            .field("entries", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
