// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace configuration.
//!
//! Configuration is stored in `.quire/config.toml`:
//! - `[remote]`: the forum server to sync with (absent means offline-only)
//! - `[cache]`: freshness settings for the singleton resources

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".quire";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "cache.db";

/// Workspace configuration stored in `.quire/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote forum server (optional - if absent, only cached data is served).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Remote forum server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// WebSocket URL (`ws://...` or `wss://...`).
    pub url: String,
    /// Upper bound for one request, connect included (default: 10000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Items requested per remote page (default: 20).
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Freshness settings for cached resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long categories and the notice stay fresh (default: 24).
    #[serde(default = "default_resource_ttl_hours")]
    pub resource_ttl_hours: i64,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_page_size() -> usize {
    20
}

fn default_resource_ttl_hours() -> i64 {
    quire_core::DEFAULT_TTL_HOURS
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            resource_ttl_hours: default_resource_ttl_hours(),
        }
    }
}

impl RemoteConfig {
    /// Creates a remote configuration with default timeout and page size.
    pub fn new(url: impl Into<String>) -> Self {
        RemoteConfig {
            url: url.into(),
            request_timeout_ms: default_request_timeout_ms(),
            page_size: default_page_size(),
        }
    }

    /// Checks the URL scheme and the numeric settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(Error::InvalidRemoteUrl(self.url.clone()));
        }
        if self.page_size == 0 {
            return Err(Error::Config("remote.page_size must be at least 1".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::Config(
                "remote.request_timeout_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Config {
    /// Creates a configuration, optionally bound to a remote.
    pub fn new(remote: Option<RemoteConfig>) -> Result<Self> {
        if let Some(remote) = &remote {
            remote.validate()?;
        }
        Ok(Config {
            remote,
            cache: CacheConfig::default(),
        })
    }

    /// Loads configuration from the given work directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if let Some(remote) = &config.remote {
            remote.validate()?;
        }
        if config.cache.resource_ttl_hours <= 0 {
            return Err(Error::Config(
                "cache.resource_ttl_hours must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Saves configuration to the given work directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Finds the `.quire` directory by walking up from the current directory.
pub fn find_work_dir() -> Result<PathBuf> {
    find_work_dir_from(&std::env::current_dir()?)
}

/// Finds the `.quire` directory by walking up from `start`.
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Path of the cache database inside a work directory.
pub fn get_db_path(work_dir: &Path) -> PathBuf {
    work_dir.join(DB_FILE_NAME)
}

/// Creates `.quire/` under `path` and writes its configuration.
pub fn init_work_dir(path: &Path, remote: Option<RemoteConfig>) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);
    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    let config = Config::new(remote)?;
    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;
    Ok(work_dir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
