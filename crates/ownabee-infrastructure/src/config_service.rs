//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/ownabee/config.toml` and
//! applies environment overrides on top.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use ownabee_core::config::PortalConfig;
use ownabee_core::error::{PortalError, Result};

use crate::paths::OwnabeePaths;

pub const ENV_API_URL: &str = "OWNABEE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "OWNABEE_TIMEOUT_SECS";
pub const ENV_LOG: &str = "OWNABEE_LOG";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, loaded lazily on first access.
    config: Arc<RwLock<Option<PortalConfig>>>,
}

impl ConfigService {
    /// Service reading the default config file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(OwnabeePaths::config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file yields defaults; an unreadable or invalid file is an
    /// error. Environment overrides are applied when the file is loaded into
    /// the cache; call [`invalidate_cache`](Self::invalidate_cache) to pick
    /// up later changes.
    pub fn get_config(&self) -> Result<PortalConfig> {
        if let Ok(read_lock) = self.config.read() {
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = apply_env_overrides(self.load_file()?, |key| std::env::var(key).ok())?;

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_file(&self) -> Result<PortalConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] No config file at {}, using defaults",
                self.path.display()
            );
            return Ok(PortalConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            PortalError::config(format!(
                "Failed to parse configuration file at {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Applies `OWNABEE_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: PortalConfig, lookup: F) -> Result<PortalConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url.trim().to_string();
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.request_timeout_secs = raw.trim().parse().map_err(|_| {
            PortalError::config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
        })?;
    }

    if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
        config.log_level = level;
    }

    Ok(config)
}
