use crate::config::Settings;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional settings file. Every table and field is optional; anything
/// absent keeps its default (or command line) value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: Option<ServiceConfig>,
    pub cache: Option<CacheConfig>,
    pub resolution: Option<ResolutionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub directory: Option<String>,
    pub index_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionConfig {
    pub try_local_first: Option<bool>,
    pub show_progress: Option<bool>,
    pub return_id: Option<bool>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Layer this file over `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(service) = &self.service {
            if let Some(endpoint) = &service.endpoint {
                settings.endpoint = endpoint.clone();
            }
            if let Some(timeout) = service.timeout_seconds {
                settings.timeout_seconds = timeout;
            }
            if let Some(retries) = service.retry_attempts {
                settings.retry_attempts = retries;
            }
        }

        if let Some(cache) = &self.cache {
            if let Some(directory) = &cache.directory {
                settings.cache_dir = PathBuf::from(directory);
            }
            if let Some(index_url) = &cache.index_url {
                settings.index_url = Some(index_url.clone());
            }
        }

        if let Some(resolution) = &self.resolution {
            if let Some(try_local_first) = resolution.try_local_first {
                settings.try_local_first = try_local_first;
            }
            if let Some(show_progress) = resolution.show_progress {
                settings.show_progress = show_progress;
            }
            if let Some(return_id) = resolution.return_id {
                settings.return_id = return_id;
            }
        }
    }
}
