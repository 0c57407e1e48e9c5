//! Application root owning one instance of every domain store.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::coordinator::{self, Undoable};
use crate::error::Result;
use crate::module::{ModuleRecord, ModuleStore, catalog_snapshot};
use crate::persistence::KeyValueStore;
use crate::privacy::{PrivacySnapshot, PrivacyStore};
use crate::view::{ViewSnapshot, ViewStore};

/// The three domain stores, constructed explicitly over a shared storage
/// backend and handed to whoever renders them.
pub struct Dashboard {
    pub view: ViewStore,
    pub modules: ModuleStore,
    pub privacy: PrivacyStore,
    catalog: Vec<ModuleRecord>,
    history_limit: Option<usize>,
}

impl Dashboard {
    /// Opens every store, merging persisted envelopes onto fresh defaults and
    /// the catalog generated from the configured categories.
    pub fn open(storage: Arc<dyn KeyValueStore>, config: &DashboardConfig) -> Self {
        let catalog = config.catalog();
        let history_limit = config.history_limit;
        let dashboard = Self {
            view: ViewStore::open(storage.clone(), ViewSnapshot::default(), history_limit),
            modules: ModuleStore::open_with_catalog(storage.clone(), &catalog, history_limit),
            privacy: PrivacyStore::open(storage, PrivacySnapshot::default(), history_limit),
            catalog,
            history_limit,
        };
        tracing::info!(
            modules = dashboard.modules.present().modules.len(),
            favorites = dashboard.view.present().favorites.len(),
            "dashboard opened"
        );
        dashboard
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }

    fn stores_mut(&mut self) -> [&mut dyn Undoable; 3] {
        [&mut self.view, &mut self.modules, &mut self.privacy]
    }

    fn stores(&self) -> [&dyn Undoable; 3] {
        [&self.view, &self.modules, &self.privacy]
    }

    pub fn can_undo_any(&self) -> bool {
        coordinator::can_undo_any(&self.stores())
    }

    pub fn can_redo_any(&self) -> bool {
        coordinator::can_redo_any(&self.stores())
    }

    /// Undoes every domain that has history. Returns how many moved.
    pub fn undo_any(&mut self) -> usize {
        coordinator::undo_any(&mut self.stores_mut())
    }

    /// Redoes every domain that has undone history. Returns how many moved.
    pub fn redo_any(&mut self) -> usize {
        coordinator::redo_any(&mut self.stores_mut())
    }

    /// Replaces the module catalog; later resets start from this catalog.
    pub fn set_catalog(&mut self, catalog: Vec<ModuleRecord>) -> Result<()> {
        match self.modules.set_catalog(&catalog) {
            Err(e) if !e.is_persistence() => Err(e),
            committed => {
                self.catalog = catalog;
                committed
            }
        }
    }

    /// Resets all stores to fresh defaults with empty history, then removes
    /// every persisted envelope.
    ///
    /// Every store is reset and every removal attempted even if one fails;
    /// the first storage error is returned.
    pub fn clear_persisted(&mut self) -> Result<()> {
        self.view.reset_in_memory(ViewSnapshot::default());
        self.modules.reset_in_memory(catalog_snapshot(&self.catalog));
        self.privacy.reset_in_memory(PrivacySnapshot::default());

        let results = [
            self.view.clear_persisted(),
            self.modules.clear_persisted(),
            self.privacy.clear_persisted(),
        ];
        let first_error = results.into_iter().find_map(|r| r.err());
        match first_error {
            Some(e) => {
                tracing::warn!(error = %e, "failed to remove some persisted dashboard state");
                Err(e)
            }
            None => {
                tracing::info!("cleared persisted dashboard state");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CivicError;
    use crate::module::build_catalog;
    use crate::persistence::MemoryStore;
    use crate::privacy::VoteDirection;

    /// Backend whose `remove` fails for one key.
    #[derive(Default)]
    struct StickyKey {
        inner: MemoryStore,
    }

    impl KeyValueStore for StickyKey {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            if key == "civic.view" {
                return Err(CivicError::storage("read-only volume"));
            }
            self.inner.remove(key)
        }
    }

    fn config() -> DashboardConfig {
        DashboardConfig {
            categories: vec!["Sports".into(), "Health".into()],
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn test_undo_any_reverts_each_domain_once() {
        let mut dashboard = Dashboard::open(Arc::new(MemoryStore::new()), &config());
        dashboard.view.set_search_query("parade").unwrap();
        dashboard.view.set_search_query("parade route").unwrap();
        dashboard.modules.toggle_module("sports").unwrap();

        assert_eq!(dashboard.undo_any(), 2);
        assert_eq!(dashboard.view.present().search_query, "parade");
        assert!(dashboard.modules.present().is_enabled("sports"));

        assert_eq!(dashboard.undo_any(), 1);
        assert_eq!(dashboard.view.present().search_query, "");
        assert!(!dashboard.can_undo_any());

        assert_eq!(dashboard.redo_any(), 2);
        assert_eq!(dashboard.view.present().search_query, "parade");
        assert!(!dashboard.modules.present().is_enabled("sports"));
    }

    #[test]
    fn test_clear_persisted_resets_everything() {
        let storage = Arc::new(MemoryStore::new());
        let mut dashboard = Dashboard::open(storage.clone(), &config());
        dashboard.view.toggle_favorite("f1").unwrap();
        dashboard.modules.toggle_module("health").unwrap();
        dashboard
            .privacy
            .increment_local_vote("f1", VoteDirection::Up)
            .unwrap();

        dashboard.clear_persisted().unwrap();
        assert!(storage.is_empty());
        assert!(dashboard.view.present().favorites.is_empty());
        assert!(dashboard.modules.present().is_enabled("health"));
        assert_eq!(dashboard.privacy.local_votes("f1"), (0, 0));
        assert!(!dashboard.can_undo_any());

        let reopened = Dashboard::open(storage, &config());
        assert!(reopened.view.present().favorites.is_empty());
    }

    #[test]
    fn test_clear_persisted_resets_every_store_when_a_removal_fails() {
        let storage = Arc::new(StickyKey::default());
        let mut dashboard = Dashboard::open(storage.clone(), &config());
        dashboard.view.toggle_favorite("f1").unwrap();
        dashboard.modules.toggle_module("sports").unwrap();
        dashboard.privacy.toggle_privacy_mode().unwrap();

        let err = dashboard.clear_persisted().unwrap_err();
        assert!(err.is_persistence());

        assert!(dashboard.view.present().favorites.is_empty());
        assert!(dashboard.modules.present().is_enabled("sports"));
        assert!(!dashboard.privacy.privacy_mode());
        assert!(!dashboard.can_undo_any());

        assert!(storage.get("civic.view").unwrap().is_some());
        assert!(storage.get("civic.modules").unwrap().is_none());
        assert!(storage.get("civic.privacy").unwrap().is_none());
    }

    #[test]
    fn test_clear_persisted_uses_current_catalog() {
        let mut dashboard = Dashboard::open(Arc::new(MemoryStore::new()), &config());
        dashboard
            .set_catalog(build_catalog(&["Sports", "Arts"]))
            .unwrap();
        dashboard.modules.toggle_module("arts").unwrap();

        dashboard.clear_persisted().unwrap();

        assert!(dashboard.modules.present().is_enabled("arts"));
        assert!(dashboard.modules.present().get("health").is_none());
    }
}
