//! Configuration service implementation.
//!
//! Loads [`DashboardConfig`] from `config.toml` and caches it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use civic_core::{CivicError, DashboardConfig, Result};

use crate::paths::CivicPaths;
use crate::storage::AtomicFile;

/// Configuration service that loads and caches the dashboard configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<DashboardConfig>>>,
}

impl ConfigService {
    /// Creates a service reading `path`. Nothing is read until first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service for the platform `config.toml`.
    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(CivicPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file yields the defaults. A file that does not parse or
    /// fails validation is a `Config` error.
    pub fn get_config(&self) -> Result<DashboardConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| CivicError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| CivicError::internal("config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Writes `config` to the file and refreshes the cache.
    pub fn save_config(&self, config: &DashboardConfig) -> Result<()> {
        config.validate()?;
        let content = config.to_toml_string()?;
        AtomicFile::new(self.path.clone()).save(&content)?;

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(config.clone());
        }
        tracing::info!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    fn load_config(&self) -> Result<DashboardConfig> {
        let Some(content) = AtomicFile::new(self.path.clone()).load()? else {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(DashboardConfig::default());
        };

        DashboardConfig::from_toml_str(&content).map_err(|e| {
            CivicError::config(format!("{}: {}", self.path.display(), e))
        })
    }
}
