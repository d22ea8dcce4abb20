// src/storage/mod.rs
//! Object-storage boundary and media setting normalization
//!
//! Media settings persist a bucket-relative object key, never an absolute
//! URL tied to one environment's storage host. The key is turned into a
//! presigned URL on demand.

mod endpoints;
mod media;

pub use endpoints::StorageEndpoints;
pub use media::{is_http_url, is_media_setting, normalize_media_setting_value};

use std::time::Duration;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::config::StorageSection;
use crate::error::{Result, SettingsError};

pub trait ObjectStorage: Send + Sync {
    /// Time-limited URL granting read access to `key`
    fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String>;

    /// Object key addressed by `url`, if it is a storage URL
    fn extract_key_from_url(&self, url: &str) -> Option<String> {
        extract_path_style_key(url)
    }
}

/// `http(s)://host[:port]/<bucket>/<key...>` → `<key...>`
pub fn extract_path_style_key(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path().trim_start_matches('/');
    let (_bucket, key) = path.split_once('/')?;
    if key.is_empty() {
        return None;
    }
    // Url::path() is still percent-encoded; object keys are not.
    let key = percent_decode_str(key).decode_utf8().ok()?;
    Some(key.into_owned())
}

/// Direct path-style URLs for a publicly readable bucket.
///
/// No signature is attached; suitable for local MinIO setups where the
/// bucket policy allows anonymous reads.
#[derive(Debug, Clone)]
pub struct PublicBucketStorage {
    base: Url,
}

impl PublicBucketStorage {
    pub fn from_config(section: &StorageSection) -> Result<Self> {
        let scheme = if section.use_ssl { "https" } else { "http" };
        let base = Url::parse(&format!(
            "{scheme}://{}/{}/",
            section.host_with_port(),
            section.bucket
        ))
        .map_err(|e| SettingsError::Config(format!("invalid storage endpoint: {e}")))?;
        Ok(Self { base })
    }
}

impl ObjectStorage for PublicBucketStorage {
    fn presigned_url(&self, key: &str, _expires_in: Duration) -> Result<String> {
        self.base
            .join(key.trim_start_matches('/'))
            .map(String::from)
            .map_err(|e| SettingsError::Storage(format!("cannot build URL for {key}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn path_style_key_drops_bucket() {
        assert_eq!(
            extract_path_style_key("http://localhost:9000/media/logos/logo.png").as_deref(),
            Some("logos/logo.png")
        );
        assert_eq!(extract_path_style_key("http://localhost:9000/media"), None);
        assert_eq!(extract_path_style_key("http://localhost:9000/media/"), None);
        assert_eq!(extract_path_style_key("not a url"), None);
    }

    #[test]
    fn path_style_key_is_percent_decoded() {
        assert_eq!(
            extract_path_style_key("http://localhost:9000/media/brand/my%20logo.png").as_deref(),
            Some("brand/my logo.png")
        );
    }

    #[test]
    fn keys_with_spaces_survive_a_round_trip() {
        let storage = PublicBucketStorage::from_config(&Config::default().storage).unwrap();
        let url = storage
            .presigned_url("brand/my logo.png", Duration::from_secs(3600))
            .unwrap();
        assert_eq!(url, "http://localhost:9000/media/brand/my%20logo.png");
        assert_eq!(
            storage.extract_key_from_url(&url).as_deref(),
            Some("brand/my logo.png")
        );
    }

    #[test]
    fn public_bucket_urls_are_path_style() {
        let storage = PublicBucketStorage::from_config(&Config::default().storage).unwrap();
        let url = storage
            .presigned_url("logos/logo.png", Duration::from_secs(3600))
            .unwrap();
        assert_eq!(url, "http://localhost:9000/media/logos/logo.png");
        assert_eq!(
            storage.extract_key_from_url(&url).as_deref(),
            Some("logos/logo.png")
        );
    }
}
