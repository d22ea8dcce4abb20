// src/config/defaults.rs
use crate::config::app::{CacheSection, DatabaseSection, EncryptionSection, StorageSection};
use crate::consts::{
    CACHE_TTL_MS, DEFAULT_SETTINGS_DB, DEFAULT_STORAGE_BUCKET, DEFAULT_STORAGE_ENDPOINT,
    DEFAULT_STORAGE_PORT, PRESIGNED_URL_TTL_SECS,
};

pub fn default_encryption() -> EncryptionSection {
    // No built-in key: a deployment must supply one
    EncryptionSection { key_hex: None }
}

pub fn default_storage() -> StorageSection {
    StorageSection {
        endpoint: DEFAULT_STORAGE_ENDPOINT.into(),
        port: DEFAULT_STORAGE_PORT,
        bucket: DEFAULT_STORAGE_BUCKET.into(),
        use_ssl: false,
        presign_ttl_secs: PRESIGNED_URL_TTL_SECS,
    }
}

pub fn default_cache() -> CacheSection {
    CacheSection { ttl_ms: CACHE_TTL_MS }
}

pub fn default_database() -> DatabaseSection {
    DatabaseSection {
        path: DEFAULT_SETTINGS_DB.into(),
    }
}

pub fn default_endpoint() -> String {
    DEFAULT_STORAGE_ENDPOINT.into()
}

pub fn default_bucket() -> String {
    DEFAULT_STORAGE_BUCKET.into()
}

pub fn default_ttl_ms() -> u64 {
    CACHE_TTL_MS
}

pub fn default_db_path() -> String {
    DEFAULT_SETTINGS_DB.into()
}

pub fn default_port() -> u16 {
    DEFAULT_STORAGE_PORT
}

pub fn default_presign_ttl() -> u64 {
    PRESIGNED_URL_TTL_SECS
}
