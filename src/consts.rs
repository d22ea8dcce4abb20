// src/consts.rs
//! Shared constants — cache windows, namespaces and key classifications

/// Lifetime of every cache entry, including resolved media URLs
pub const CACHE_TTL_MS: u64 = 60_000;

/// Validity requested for presigned media URLs (one hour)
pub const PRESIGNED_URL_TTL_SECS: u64 = 3_600;

/// Cache key for the unscoped aggregate of all settings
pub const ALL_CACHE_KEY: &str = "all";

/// Namespace prefix for resolved media URLs
pub const MEDIA_CACHE_PREFIX: &str = "media:";

/// Required length of the hex-encoded encryption key (32 bytes)
pub const ENCRYPTION_KEY_HEX_LEN: usize = 64;

/// AES block / CBC initialization vector size in bytes
pub const IV_LEN: usize = 16;

/// Separator between the IV and ciphertext in an encoded value
pub const CIPHERTEXT_SEPARATOR: char = ':';

/// Setting keys whose values are encrypted at rest
pub const SENSITIVE_FIELDS: &[&str] = &["email_smtp_password"];

/// Setting keys whose values are object-storage references
pub const MEDIA_SETTING_KEYS: &[&str] = &[
    "logo_url",
    "logo_dark_url",
    "logo_light_url",
    "logo_mobile_url",
    "favicon_url",
    "og_image_url",
];

/// Storage hosts that always count as internal, alongside the configured endpoint
pub const INTERNAL_STORAGE_ALIASES: &[&str] = &["localhost:9000", "127.0.0.1:9000", "minio:9000"];

/// Path of the application's media proxy; its `url` query parameter wraps the real location
pub const MEDIA_PROXY_PATH: &str = "/api/media";

/// Default object-storage endpoint for local development
pub const DEFAULT_STORAGE_ENDPOINT: &str = "localhost";
pub const DEFAULT_STORAGE_PORT: u16 = 9000;
pub const DEFAULT_STORAGE_BUCKET: &str = "media";

/// Default SQLite database location
pub const DEFAULT_SETTINGS_DB: &str = "data/settings.db";

/// Placeholder written in exports instead of sensitive values
pub const REDACTED_VALUE: &str = "********";
