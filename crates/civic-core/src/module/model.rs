//! Module catalog snapshot.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identifier of a feature module, derived from its category label.
pub type ModuleId = String;

/// One toggleable feature panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    pub id: ModuleId,
    pub name: String,
    pub enabled: bool,
    pub priority: i32,
    /// Optional per-dimension ranking weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, f64>>,
}

impl ModuleRecord {
    /// Creates an enabled module with priority 1 for a category label.
    pub fn from_label(label: &str) -> Self {
        Self {
            id: module_id(label),
            name: label.to_string(),
            enabled: true,
            priority: 1,
            weights: None,
        }
    }

    /// Display order: priority descending, then name ascending.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Derives a module id from a category label.
///
/// The label is lowercased and every run of non-alphanumeric characters
/// becomes a single `-`; leading and trailing separators are dropped.
pub fn module_id(label: &str) -> ModuleId {
    let mut id = String::with_capacity(label.len());
    let mut pending_separator = false;
    for c in label.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_separator && !id.is_empty() {
                id.push('-');
            }
            pending_separator = false;
            id.push(c);
        } else {
            pending_separator = true;
        }
    }
    id
}

/// Module catalog state at one instant.
///
/// Records are reference-counted so snapshots share every entry that an
/// action did not touch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleCatalogSnapshot {
    pub modules: BTreeMap<ModuleId, Arc<ModuleRecord>>,
}

impl ModuleCatalogSnapshot {
    pub fn new(modules: BTreeMap<ModuleId, Arc<ModuleRecord>>) -> Self {
        Self { modules }
    }

    pub fn get(&self, id: &str) -> Option<&ModuleRecord> {
        self.modules.get(id).map(Arc::as_ref)
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.get(id).is_some_and(|m| m.enabled)
    }

    /// Modules in display order.
    pub fn ordered(&self) -> Vec<&ModuleRecord> {
        let mut list: Vec<&ModuleRecord> = self.modules.values().map(Arc::as_ref).collect();
        list.sort_by(|a, b| a.display_cmp(b));
        list
    }

    /// Ids of enabled modules, in id order.
    pub fn enabled_ids(&self) -> Vec<&str> {
        self.modules
            .values()
            .filter(|m| m.enabled)
            .map(|m| m.id.as_str())
            .collect()
    }

    /// Returns a copy with exactly one entry's `enabled` flipped.
    ///
    /// Every other entry keeps its `Arc`. Returns `None` for unknown ids.
    pub fn with_module_toggled(&self, id: &str) -> Option<Self> {
        let current = self.modules.get(id)?;
        let toggled = ModuleRecord {
            enabled: !current.enabled,
            ..ModuleRecord::clone(current)
        };
        let mut modules = self.modules.clone();
        modules.insert(id.to_string(), Arc::new(toggled));
        Some(Self { modules })
    }
}
