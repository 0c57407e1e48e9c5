//! File-backed durable storage.

pub mod atomic_file;
pub mod file_kv_store;

pub use atomic_file::{AtomicFile, AtomicFileError};
pub use file_kv_store::FileKeyValueStore;
