//! Unified path management for civic-dash files.

use std::path::PathBuf;

use civic_core::CivicError;

const APP_DIR: &str = "civic-dash";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
    /// The platform data directory could not be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
            PathError::DataDirNotFound => write!(f, "Cannot find data directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for CivicError {
    fn from(e: PathError) -> Self {
        CivicError::config(e.to_string())
    }
}

/// Platform locations for civic-dash.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/civic-dash/        # Config directory
/// └── config.toml              # Dashboard configuration
///
/// ~/.local/share/civic-dash/   # Data directory
/// └── state/                   # One JSON envelope per storage key
/// ```
pub struct CivicPaths;

impl CivicPaths {
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DataDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default directory for persisted dashboard state.
    pub fn state_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("state"))
    }
}
