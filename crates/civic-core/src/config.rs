//! Dashboard configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CivicError, Result};
use crate::module::{ModuleRecord, build_catalog};

/// Category labels the module catalog is generated from when the config
/// does not list its own.
pub const DEFAULT_CATEGORIES: [&str; 18] = [
    "News - Regional",
    "News - Local",
    "Gov - Municipal",
    "Gov - County",
    "Safety - Police & Courts",
    "LV Business",
    "Education - Higher Ed",
    "Education - K12",
    "Community & Civic",
    "Media / Culture",
    "Lifestyle - Arts & Events",
    "Lifestyle - Food & Drink",
    "Lifestyle - Environment",
    "Lifestyle - Outdoors",
    "Sports",
    "Transit & Weather",
    "Health",
    "Utilities / Infrastructure",
];

/// Root configuration, read from `config.toml`.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Maximum undo depth per domain. `None` keeps unlimited history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    /// Category labels used to build the module catalog.
    pub categories: Vec<String>,
    /// Overrides the platform storage directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            storage_dir: None,
        }
    }
}

impl DashboardConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(CivicError::config("categories must not contain empty labels"));
        }
        Ok(())
    }

    /// Fresh module catalog for the configured categories.
    pub fn catalog(&self) -> Vec<ModuleRecord> {
        build_catalog(&self.categories)
    }
}
