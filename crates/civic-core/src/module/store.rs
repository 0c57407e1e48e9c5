//! Module store actions.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::envelope::ModuleEnvelope;
use super::model::{ModuleCatalogSnapshot, ModuleRecord};
use super::reconcile::{reconcile, validate_catalog};
use crate::error::{CivicError, Result};
use crate::persistence::KeyValueStore;
use crate::store::DomainStore;

pub type ModuleStore = DomainStore<ModuleEnvelope>;

/// Base snapshot for a fresh catalog, before any user override is applied.
///
/// An invalid catalog is logged and yields an empty snapshot.
pub fn catalog_snapshot(catalog: &[ModuleRecord]) -> ModuleCatalogSnapshot {
    match validate_catalog(catalog) {
        Ok(()) => ModuleCatalogSnapshot::new(reconcile(catalog, &BTreeMap::new())),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring invalid module catalog");
            ModuleCatalogSnapshot::default()
        }
    }
}

impl DomainStore<ModuleEnvelope> {
    /// Opens the module store over a freshly supplied catalog.
    ///
    /// The catalog becomes the base snapshot, then the persisted `enabled`
    /// overrides are merged on top.
    pub fn open_with_catalog(
        storage: Arc<dyn KeyValueStore>,
        catalog: &[ModuleRecord],
        history_limit: Option<usize>,
    ) -> Self {
        Self::open(storage, catalog_snapshot(catalog), history_limit)
    }

    /// Replaces the catalog, keeping the user's enabled flags for every id
    /// that survives the refresh.
    pub fn set_catalog(&mut self, catalog: &[ModuleRecord]) -> Result<()> {
        validate_catalog(catalog)?;
        self.commit(|s| ModuleCatalogSnapshot::new(reconcile(catalog, &s.modules)))
    }

    /// Flips one module's `enabled` flag.
    pub fn toggle_module(&mut self, id: &str) -> Result<()> {
        let next = self
            .present()
            .with_module_toggled(id)
            .ok_or_else(|| CivicError::not_found("module", id))?;
        self.commit(move |_| next)
    }

    pub fn ordered(&self) -> Vec<&ModuleRecord> {
        self.present().ordered()
    }

    pub fn enabled_ids(&self) -> Vec<&str> {
        self.present().enabled_ids()
    }
}
