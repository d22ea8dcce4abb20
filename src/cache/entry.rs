// src/cache/entry.rs
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What a cache slot holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    /// One decrypted setting value
    Single(String),
    /// Key → decrypted value for a category or the `"all"` aggregate
    Map(Arc<BTreeMap<String, String>>),
    /// Resolved media URL; `None` records a failed resolution
    MediaUrl(Option<String>),
}

/// Immutable snapshot; replaced wholesale, never mutated in place
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: CachedValue,
    pub timestamp: Instant,
}

impl CacheEntry {
    pub fn new(data: CachedValue, timestamp: Instant) -> Self {
        Self { data, timestamp }
    }

    /// Valid only while `now - timestamp < ttl`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.timestamp) < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshness_boundary_is_exclusive() {
        let t0 = Instant::now();
        let ttl = Duration::from_millis(60_000);
        let entry = CacheEntry::new(CachedValue::Single("v".into()), t0);
        assert!(entry.is_fresh(t0, ttl));
        assert!(entry.is_fresh(t0 + Duration::from_millis(59_999), ttl));
        assert!(!entry.is_fresh(t0 + ttl, ttl));
    }
}
