//! Durable subset of the view snapshot.

use serde::{Deserialize, Serialize};

use super::model::{Density, MAX_SEARCH_QUERY_LEN, SavedQuery, VelocityWindow, ViewSnapshot};
use crate::persistence::{Envelope, lenient};

/// Persisted view fields: favorites, density, velocity window and saved
/// queries. Search text, category and view mode always start from defaults.
///
/// Favorites are a set in memory and a sorted array on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEnvelope {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub favorites: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub density: Option<Density>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub velocity_window: Option<VelocityWindow>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_queries: Option<Vec<SavedQuery>>,
}

impl Envelope for ViewEnvelope {
    type Snapshot = ViewSnapshot;
    const KEY: &'static str = "civic.view";

    fn project(snapshot: &ViewSnapshot) -> Self {
        Self {
            favorites: Some(snapshot.favorites.iter().cloned().collect()),
            density: Some(snapshot.density),
            velocity_window: Some(snapshot.velocity_window),
            saved_queries: Some(snapshot.saved_queries.clone()),
        }
    }

    fn merge_into(self, fresh: ViewSnapshot) -> ViewSnapshot {
        ViewSnapshot {
            favorites: self
                .favorites
                .map(|ids| ids.into_iter().filter(|id| !id.is_empty()).collect())
                .unwrap_or(fresh.favorites),
            density: self.density.unwrap_or(fresh.density),
            velocity_window: self.velocity_window.unwrap_or(fresh.velocity_window),
            saved_queries: self
                .saved_queries
                .map(|queries| {
                    queries
                        .into_iter()
                        .filter(|q| q.query.chars().count() <= MAX_SEARCH_QUERY_LEN)
                        .collect()
                })
                .unwrap_or(fresh.saved_queries),
            ..fresh
        }
    }
}
