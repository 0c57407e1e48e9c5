//! File-backed [`KeyValueStore`]: one `<key>.json` file per storage key.

use std::path::{Path, PathBuf};

use civic_core::{CivicError, KeyValueStore, Result};

use super::atomic_file::AtomicFile;

const FILE_EXTENSION: &str = "json";

/// Durable storage rooted at a directory.
///
/// ```text
/// <root>/
/// ├── civic.view.json
/// ├── civic.view.lock          # write lock, kept after remove
/// ├── civic.modules.json
/// ├── civic.modules.lock
/// ├── civic.privacy.json
/// └── civic.privacy.lock
/// ```
///
/// Lock files are empty and outlive their values; a key is absent exactly
/// when its `.json` file is.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn file_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{FILE_EXTENSION}")))
    }

    fn file(&self, key: &str) -> Result<AtomicFile> {
        Ok(AtomicFile::new(self.file_path(key)?))
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(CivicError::storage(format!("invalid storage key '{key}'")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.file(key)?.load()?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file(key)?.save(value)?;
        tracing::debug!(key, root = %self.root.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file(key)?.remove()?;
        tracing::debug!(key, root = %self.root.display(), "removed value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("state"));

        assert_eq!(store.get("civic.view").unwrap(), None);

        store.set("civic.view", r#"{"favorites":["a"]}"#).unwrap();
        assert_eq!(
            store.get("civic.view").unwrap().as_deref(),
            Some(r#"{"favorites":["a"]}"#)
        );
        assert!(temp_dir.path().join("state/civic.view.json").exists());

        store.remove("civic.view").unwrap();
        assert_eq!(store.get("civic.view").unwrap(), None);
        store.remove("civic.view").unwrap();
    }

    #[test]
    fn test_rejects_keys_that_escape_the_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        for key in ["", "../civic.view", "a/b", ".hidden"] {
            let err = store.set(key, "{}").unwrap_err();
            assert!(err.is_persistence(), "key {key:?} accepted");
        }
    }

    #[test]
    fn test_keys_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set("civic.view", "1").unwrap();
        store.set("civic.privacy", "2").unwrap();
        store.remove("civic.view").unwrap();

        assert_eq!(store.get("civic.privacy").unwrap().as_deref(), Some("2"));
    }
}
