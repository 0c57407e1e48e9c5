//! Partial persistence of snapshots to durable key/value storage.
//!
//! Each domain declares an [`Envelope`]: the durable subset of its snapshot,
//! stored as a JSON object under a fixed key. Reads are lenient. A value that
//! is not a JSON object is treated as absent, and a single field with an
//! incompatible type is dropped without discarding its siblings, so older or
//! newer envelopes always merge field by field onto fresh defaults.

mod memory;

pub use memory::MemoryStore;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Durable string key/value storage shared by all domain stores.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// The durable subset of one domain's snapshot.
pub trait Envelope: Serialize + DeserializeOwned {
    type Snapshot: Clone;

    /// Storage key for this domain.
    const KEY: &'static str;

    /// Projects a snapshot down to its durable fields.
    fn project(snapshot: &Self::Snapshot) -> Self;

    /// Overlays every durable field present in `self` onto `fresh`.
    ///
    /// Must be idempotent; fields missing from the envelope keep the value
    /// from `fresh`.
    fn merge_into(self, fresh: Self::Snapshot) -> Self::Snapshot;
}

/// Reads and writes one domain's envelope.
pub struct PersistenceAdapter<E> {
    storage: Arc<dyn KeyValueStore>,
    _envelope: PhantomData<fn() -> E>,
}

impl<E> Clone for PersistenceAdapter<E> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            _envelope: PhantomData,
        }
    }
}

impl<E: Envelope> PersistenceAdapter<E> {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            _envelope: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        E::KEY
    }

    /// Writes the durable projection of `snapshot`.
    pub fn write(&self, snapshot: &E::Snapshot) -> Result<()> {
        let envelope = E::project(snapshot);
        let serialized = serde_json::to_string(&envelope).inspect_err(|e| {
            tracing::warn!(key = E::KEY, error = %e, "failed to serialize envelope");
        })?;
        self.storage.set(E::KEY, &serialized).inspect_err(|e| {
            tracing::warn!(key = E::KEY, error = %e, "failed to write envelope");
        })
    }

    /// Reads the stored envelope.
    ///
    /// Returns `None` if nothing was stored, the storage could not be read,
    /// or the stored value is not a JSON object.
    pub fn read(&self) -> Option<E> {
        let raw = match self.storage.get(E::KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = E::KEY, error = %e, "failed to read envelope");
                return None;
            }
        };

        let value: JsonValue = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = E::KEY, error = %e, "discarding corrupt envelope");
                return None;
            }
        };
        if !value.is_object() {
            tracing::warn!(key = E::KEY, "discarding envelope that is not an object");
            return None;
        }

        match serde_json::from_value(value) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                tracing::warn!(key = E::KEY, error = %e, "discarding incompatible envelope");
                None
            }
        }
    }

    /// Overlays `persisted` onto `fresh`; `None` yields `fresh` unchanged.
    pub fn merge(persisted: Option<E>, fresh: E::Snapshot) -> E::Snapshot {
        match persisted {
            Some(envelope) => envelope.merge_into(fresh),
            None => fresh,
        }
    }

    /// Reads the stored envelope and merges it onto `fresh`.
    pub fn load(&self, fresh: E::Snapshot) -> E::Snapshot {
        Self::merge(self.read(), fresh)
    }

    /// Removes the stored envelope.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(E::KEY)
    }
}

/// Deserializes an optional envelope field, treating a value of the wrong
/// shape as missing.
///
/// Use together with `#[serde(default)]` so absent fields also become `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = JsonValue::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring persisted field with incompatible type");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter {
        count: u32,
        label: String,
        scratch: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct CounterEnvelope {
        #[serde(default, deserialize_with = "lenient")]
        count: Option<u32>,
        #[serde(default, deserialize_with = "lenient")]
        label: Option<String>,
    }

    impl Envelope for CounterEnvelope {
        type Snapshot = Counter;
        const KEY: &'static str = "test.counter";

        fn project(snapshot: &Counter) -> Self {
            Self {
                count: Some(snapshot.count),
                label: Some(snapshot.label.clone()),
            }
        }

        fn merge_into(self, fresh: Counter) -> Counter {
            Counter {
                count: self.count.unwrap_or(fresh.count),
                label: self.label.unwrap_or(fresh.label),
                ..fresh
            }
        }
    }

    fn adapter() -> (Arc<MemoryStore>, PersistenceAdapter<CounterEnvelope>) {
        let store = Arc::new(MemoryStore::new());
        let adapter = PersistenceAdapter::new(store.clone());
        (store, adapter)
    }

    #[test]
    fn test_read_absent() {
        let (_, adapter) = adapter();
        assert!(adapter.read().is_none());
    }

    #[test]
    fn test_write_only_durable_fields() {
        let (store, adapter) = adapter();
        let snapshot = Counter {
            count: 3,
            label: "votes".into(),
            scratch: "transient".into(),
        };
        adapter.write(&snapshot).unwrap();

        let raw = store.get("test.counter").unwrap().unwrap();
        assert!(!raw.contains("scratch"));

        let loaded = adapter.load(Counter::default());
        assert_eq!(loaded.count, 3);
        assert_eq!(loaded.label, "votes");
        assert_eq!(loaded.scratch, "");
    }

    #[test]
    fn test_corrupt_value_degrades_to_absent() {
        let (store, adapter) = adapter();
        store.set("test.counter", "{not json").unwrap();
        assert!(adapter.read().is_none());

        store.set("test.counter", "[1, 2, 3]").unwrap();
        assert!(adapter.read().is_none());
    }

    #[test]
    fn test_mistyped_field_falls_back_alone() {
        let (store, adapter) = adapter();
        store
            .set("test.counter", r#"{"count": "three", "label": "kept"}"#)
            .unwrap();

        let fresh = Counter {
            count: 10,
            ..Counter::default()
        };
        let loaded = adapter.load(fresh);
        assert_eq!(loaded.count, 10);
        assert_eq!(loaded.label, "kept");
    }

    #[test]
    fn test_missing_and_unknown_fields_are_tolerated() {
        let (store, adapter) = adapter();
        store
            .set("test.counter", r#"{"label": "old", "addedLater": true}"#)
            .unwrap();

        let loaded = adapter.load(Counter {
            count: 5,
            ..Counter::default()
        });
        assert_eq!(loaded.count, 5);
        assert_eq!(loaded.label, "old");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let envelope = || CounterEnvelope {
            count: Some(2),
            label: None,
        };
        let fresh = Counter {
            label: "fresh".into(),
            ..Counter::default()
        };
        let once = PersistenceAdapter::merge(Some(envelope()), fresh);
        let twice = PersistenceAdapter::merge(Some(envelope()), once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.label, "fresh");
    }

    #[test]
    fn test_clear_removes_value() {
        let (_, adapter) = adapter();
        adapter.write(&Counter::default()).unwrap();
        adapter.clear().unwrap();
        assert!(adapter.read().is_none());
    }
}
