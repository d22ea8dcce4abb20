// src/storage/media.rs
use url::Url;

use super::{ObjectStorage, StorageEndpoints};
use crate::consts::{MEDIA_PROXY_PATH, MEDIA_SETTING_KEYS};

pub fn is_media_setting(key: &str) -> bool {
    MEDIA_SETTING_KEYS.contains(&key)
}

pub fn is_http_url(value: &str) -> bool {
    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Reduce a media setting value to its portable form.
///
/// - blank → `""`
/// - anything that is not an HTTP(S) URL is already a bare key → unchanged
/// - media proxy URL → normalize its `url` query parameter
/// - internal storage URL → extracted object key
/// - any other URL → unchanged
///
/// Applying this twice gives the same result as applying it once.
pub fn normalize_media_setting_value(
    value: &str,
    endpoints: &StorageEndpoints,
    storage: &dyn ObjectStorage,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if !is_http_url(trimmed) {
        return trimmed.to_string();
    }

    let Ok(url) = Url::parse(trimmed) else {
        return trimmed.to_string();
    };

    if url.path() == MEDIA_PROXY_PATH {
        if let Some((_, inner)) = url.query_pairs().find(|(name, _)| name == "url") {
            return normalize_media_setting_value(&inner, endpoints, storage);
        }
    }

    if endpoints.contains(&url) {
        if let Some(key) = storage.extract_key_from_url(trimmed) {
            // the key itself may be another storage URL
            return normalize_media_setting_value(&key, endpoints, storage);
        }
        tracing::warn!(url = %trimmed, "internal storage URL without an object key");
    }

    trimmed.to_string()
}
