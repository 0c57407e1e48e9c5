//! Merging a freshly supplied module catalog with the user's previous choices.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use super::model::{ModuleId, ModuleRecord};
use crate::error::{CivicError, Result};

/// Builds the fresh catalog for a list of category labels.
///
/// Every module starts enabled with priority 1. When two labels map to the
/// same id, the first label wins.
pub fn build_catalog<S: AsRef<str>>(labels: &[S]) -> Vec<ModuleRecord> {
    let mut seen = HashSet::new();
    labels
        .iter()
        .map(|label| ModuleRecord::from_label(label.as_ref()))
        .filter(|record| {
            if record.id.is_empty() {
                tracing::warn!(name = %record.name, "skipping category without an id");
                return false;
            }
            seen.insert(record.id.clone())
        })
        .collect()
}

/// Checks a catalog before it is reconciled: ids and names must be
/// non-empty and ids unique.
pub fn validate_catalog(catalog: &[ModuleRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in catalog {
        if record.id.is_empty() {
            return Err(CivicError::validation("module.id", "module id is empty"));
        }
        if record.name.trim().is_empty() {
            return Err(CivicError::validation(
                "module.name",
                format!("module '{}' has an empty name", record.id),
            ));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(CivicError::validation(
                "module.id",
                format!("duplicate module id '{}'", record.id),
            ));
        }
    }
    Ok(())
}

/// Reconciles a fresh catalog with the previous module mapping.
///
/// Each fresh record keeps its `id`, `name`, `priority` and `weights`, while
/// `enabled` comes from the previous entry with the same id when one exists.
/// Ids only present in `previous` are dropped. An entry whose reconciled
/// value equals the previous one reuses the previous `Arc`.
pub fn reconcile(
    fresh: &[ModuleRecord],
    previous: &BTreeMap<ModuleId, Arc<ModuleRecord>>,
) -> BTreeMap<ModuleId, Arc<ModuleRecord>> {
    fresh
        .iter()
        .map(|record| {
            let existing = previous.get(&record.id);
            let merged = ModuleRecord {
                enabled: existing.map_or(record.enabled, |m| m.enabled),
                ..record.clone()
            };
            let entry = match existing {
                Some(prev) if **prev == merged => Arc::clone(prev),
                _ => Arc::new(merged),
            };
            (record.id.clone(), entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, enabled: bool, priority: i32) -> ModuleRecord {
        ModuleRecord {
            id: id.to_string(),
            name: name.to_string(),
            enabled,
            priority,
            weights: None,
        }
    }

    fn mapping(records: Vec<ModuleRecord>) -> BTreeMap<ModuleId, Arc<ModuleRecord>> {
        records
            .into_iter()
            .map(|r| (r.id.clone(), Arc::new(r)))
            .collect()
    }

    #[test]
    fn test_enabled_preserved_name_and_priority_refreshed() {
        let fresh = vec![record("a", "A", true, 1)];
        let previous = mapping(vec![record("a", "OldA", false, 9)]);

        let result = reconcile(&fresh, &previous);
        assert_eq!(result.len(), 1);
        assert_eq!(*result["a"], record("a", "A", false, 1));
    }

    #[test]
    fn test_new_module_uses_fresh_default() {
        let fresh = vec![record("a", "A", true, 1), record("b", "B", false, 2)];
        let previous = mapping(vec![record("a", "A", false, 1)]);

        let result = reconcile(&fresh, &previous);
        assert!(!result["a"].enabled);
        assert!(!result["b"].enabled);
    }

    #[test]
    fn test_removed_module_is_dropped() {
        let fresh = vec![record("a", "A", true, 1)];
        let previous = mapping(vec![record("a", "A", true, 1), record("gone", "Gone", false, 1)]);

        let result = reconcile(&fresh, &previous);
        assert!(!result.contains_key("gone"));
    }

    #[test]
    fn test_unchanged_entries_keep_identity() {
        let fresh = vec![record("a", "A", true, 1), record("b", "B", true, 1)];
        let previous = mapping(vec![record("a", "A", true, 1), record("b", "Old", true, 1)]);

        let result = reconcile(&fresh, &previous);
        assert!(Arc::ptr_eq(&result["a"], &previous["a"]));
        assert!(!Arc::ptr_eq(&result["b"], &previous["b"]));
    }

    #[test]
    fn test_build_catalog_dedupes_ids() {
        let catalog = build_catalog(&["News - Local", "News / Local", "Sports", "!!"]);
        let ids: Vec<&str> = catalog.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["news-local", "sports"]);
        assert_eq!(catalog[0].name, "News - Local");
        assert!(catalog.iter().all(|m| m.enabled && m.priority == 1));
    }

    #[test]
    fn test_validate_catalog() {
        assert!(validate_catalog(&[record("a", "A", true, 1)]).is_ok());
        assert!(
            validate_catalog(&[record("a", "A", true, 1), record("a", "B", true, 1)])
                .unwrap_err()
                .is_validation()
        );
        assert!(validate_catalog(&[record("", "A", true, 1)]).is_err());
        assert!(validate_catalog(&[record("a", " ", true, 1)]).is_err());
    }
}
