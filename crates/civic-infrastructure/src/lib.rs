//! Filesystem adapters for civic-dash: platform paths, the file-backed
//! key/value store and the config loader.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::{CivicPaths, PathError};
pub use crate::storage::FileKeyValueStore;
