// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_encryption")]
    pub encryption: EncryptionSection,
    #[serde(default = "default_storage")]
    pub storage: StorageSection,
    #[serde(default = "default_cache")]
    pub cache: CacheSection,
    #[serde(default = "default_database")]
    pub database: DatabaseSection,
}

#[derive(Clone, Deserialize)]
pub struct EncryptionSection {
    /// 64 hex characters (32 bytes)
    #[serde(default)]
    pub key_hex: Option<String>,
}

// Never print the key itself
impl std::fmt::Debug for EncryptionSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionSection")
            .field("key_hex", &self.key_hex.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default)]
    pub use_ssl: bool,
    #[serde(default = "default_presign_ttl")]
    pub presign_ttl_secs: u64,
}

impl StorageSection {
    /// `host:port` as it appears in object URLs
    pub fn host_with_port(&self) -> String {
        format!("{}:{}", self.endpoint, self.port)
    }

    pub fn presign_ttl(&self) -> Duration {
        Duration::from_secs(self.presign_ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

impl CacheSection {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSection {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            encryption: default_encryption(),
            storage: default_storage(),
            cache: default_cache(),
            database: default_database(),
        }
    }
}

impl Config {
    /// Parse a TOML document; omitted sections take built-in defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file. A missing file yields defaults; an unreadable
    /// or invalid one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(config_path = %path.display(), "config file not found, using built-in defaults");
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        Config::from_toml_str(&content).map_err(|err| {
            tracing::error!(config_path = %path.display(), error = %err, "invalid config file");
            err
        })
    }

    /// Apply `ENCRYPTION_KEY`, `MINIO_ENDPOINT`, `MINIO_PORT`, `MINIO_BUCKET`, `SETTINGS_DB`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    pub(crate) fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("ENCRYPTION_KEY") {
            self.encryption.key_hex = Some(key);
        }
        if let Some(endpoint) = lookup("MINIO_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            self.storage.endpoint = endpoint;
        }
        if let Some(port) = lookup("MINIO_PORT") {
            match port.trim().parse() {
                Ok(port) => self.storage.port = port,
                Err(_) => tracing::warn!(%port, "ignoring unparsable MINIO_PORT"),
            }
        }
        if let Some(bucket) = lookup("MINIO_BUCKET") {
            self.storage.bucket = bucket;
        }
        if let Some(path) = lookup("SETTINGS_DB") {
            self.database.path = path;
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once per process: `SETTINGS_CONFIG` (default `settings.toml`)
/// plus environment overrides
pub fn load() -> Result<&'static Config> {
    if let Some(conf) = CONFIG.get() {
        return Ok(conf);
    }

    let config_path =
        std::env::var("SETTINGS_CONFIG").unwrap_or_else(|_| "settings.toml".to_string());
    let mut conf = Config::load_from(&config_path)?;
    conf.apply_env_overrides();

    Ok(CONFIG.get_or_init(|| conf))
}
