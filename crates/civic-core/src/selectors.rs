//! Derived, read-only views over the store snapshots.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::module::{ModuleCatalogSnapshot, ModuleRecord};
use crate::view::{ViewMode, ViewSnapshot};

/// Namespace for deterministic source ids.
const SOURCE_NAMESPACE: Uuid = Uuid::from_u128(0xa9a7_3802_517e_4f2a_a3a4_72bc_e5c1_0bce);

/// One entry of the content-source catalog, as consumed by the filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
}

impl SourceItem {
    /// Creates an item whose id is derived from its url, category and title.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let url = url.into();
        let category = category.into();
        Self {
            id: source_id(&url, &category, &title),
            title,
            url,
            category,
        }
    }
}

/// Deterministic UUID v5 for a source.
///
/// The same feed listed under two categories gets two distinct ids.
pub fn source_id(url: &str, category: &str, title: &str) -> String {
    let name = format!("{}-{}-{}", url, category, title);
    Uuid::new_v5(&SOURCE_NAMESPACE, name.as_bytes()).to_string()
}

/// Applies the view's filters: favorites-only mode, the selected category
/// (exact match) and a case-insensitive query over title and url.
pub fn filter_sources<'a>(items: &'a [SourceItem], view: &ViewSnapshot) -> Vec<&'a SourceItem> {
    let query = view.search_query.to_lowercase();
    items
        .iter()
        .filter(|item| view.view_mode != ViewMode::Favorites || view.is_favorite(&item.id))
        .filter(|item| {
            view.selected_category
                .as_deref()
                .is_none_or(|category| item.category == category)
        })
        .filter(|item| {
            query.is_empty()
                || item.title.to_lowercase().contains(&query)
                || item.url.to_lowercase().contains(&query)
        })
        .collect()
}

/// The first `n` modules in display order.
pub fn top_modules(snapshot: &ModuleCatalogSnapshot, n: usize) -> Vec<&ModuleRecord> {
    let mut ordered = snapshot.ordered();
    ordered.truncate(n);
    ordered
}
