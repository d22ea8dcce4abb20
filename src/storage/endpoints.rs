// src/storage/endpoints.rs
use url::Url;

use crate::config::StorageSection;
use crate::consts::INTERNAL_STORAGE_ALIASES;

/// `host:port` pairs that identify the internal object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEndpoints {
    hosts: Vec<String>,
}

impl StorageEndpoints {
    /// The configured endpoint plus the well-known local aliases
    pub fn new(primary: impl Into<String>) -> Self {
        let mut hosts = vec![primary.into().to_ascii_lowercase()];
        for alias in INTERNAL_STORAGE_ALIASES {
            if !hosts.iter().any(|h| h == alias) {
                hosts.push((*alias).to_string());
            }
        }
        Self { hosts }
    }

    pub fn from_config(section: &StorageSection) -> Self {
        Self::new(section.host_with_port())
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Whether `url` points at the internal object store
    pub fn contains(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let authority = match url.port_or_known_default() {
            Some(port) => format!("{}:{port}", host.to_ascii_lowercase()),
            None => host.to_ascii_lowercase(),
        };
        self.hosts.iter().any(|h| *h == authority)
    }
}

impl Default for StorageEndpoints {
    fn default() -> Self {
        Self::new(INTERNAL_STORAGE_ALIASES[0])
    }
}
