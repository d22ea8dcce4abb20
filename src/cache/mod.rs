// src/cache/mod.rs
//! In-memory TTL cache for settings
//!
//! Entries expire lazily: a stale entry stays in the map until the next
//! lookup for its key treats it as absent. There is no background sweep.
//!
//! Keys share one map and are namespaced by convention:
//! - the setting key itself (single value)
//! - a category name or `"all"` (aggregate map)
//! - `media:<key>` (resolved media URL, possibly `None`)

mod entry;
mod ttl_cache;

pub use entry::{CacheEntry, CachedValue};
pub use ttl_cache::{media_cache_key, SettingsCache};
