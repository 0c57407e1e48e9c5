//! View/filter snapshot.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CivicError;

/// Maximum length of the free-text search query, in characters.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Which sources the list shows.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ViewMode {
    #[default]
    All,
    Favorites,
}

/// Card layout density.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Density {
    #[default]
    Full,
    Compact,
}

/// Look-back window, in hours, used for activity velocity.
///
/// Only the hour counts in [`VelocityWindow::ALLOWED_HOURS`] are valid;
/// persisted values outside that set are rejected on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct VelocityWindow(u32);

impl VelocityWindow {
    pub const ALLOWED_HOURS: [u32; 5] = [1, 6, 24, 72, 168];

    pub fn hours(self) -> u32 {
        self.0
    }
}

impl Default for VelocityWindow {
    fn default() -> Self {
        Self(24)
    }
}

impl TryFrom<u32> for VelocityWindow {
    type Error = CivicError;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        if Self::ALLOWED_HOURS.contains(&hours) {
            Ok(Self(hours))
        } else {
            Err(CivicError::validation(
                "velocity_window",
                format!(
                    "{} hours is not one of {:?}",
                    hours,
                    Self::ALLOWED_HOURS
                ),
            ))
        }
    }
}

impl From<VelocityWindow> for u32 {
    fn from(window: VelocityWindow) -> Self {
        window.0
    }
}

impl fmt::Display for VelocityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.0)
    }
}

/// A named search the user can re-apply later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    pub name: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub view_mode: ViewMode,
    pub created_at: DateTime<Utc>,
}

/// View/filter state at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewSnapshot {
    pub search_query: String,
    pub selected_category: Option<String>,
    pub view_mode: ViewMode,
    pub favorites: BTreeSet<String>,
    pub density: Density,
    pub velocity_window: VelocityWindow,
    pub saved_queries: Vec<SavedQuery>,
}

impl ViewSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn saved_query(&self, name: &str) -> Option<&SavedQuery> {
        self.saved_queries.iter().find(|q| q.name == name)
    }

    /// Returns a copy with `id` removed from favorites if present, added
    /// otherwise. `self` is left untouched.
    pub fn with_favorite_toggled(&self, id: &str) -> Self {
        let mut favorites = self.favorites.clone();
        if !favorites.remove(id) {
            favorites.insert(id.to_string());
        }
        Self {
            favorites,
            ..self.clone()
        }
    }

    /// Returns a copy with the current query, category and view mode saved
    /// under `name`, replacing any saved query with the same name in place.
    pub fn with_saved_query(&self, name: &str, created_at: DateTime<Utc>) -> Self {
        let entry = SavedQuery {
            name: name.to_string(),
            query: self.search_query.clone(),
            category: self.selected_category.clone(),
            view_mode: self.view_mode,
            created_at,
        };
        let mut saved_queries = self.saved_queries.clone();
        match saved_queries.iter_mut().find(|q| q.name == name) {
            Some(existing) => *existing = entry,
            None => saved_queries.push(entry),
        }
        Self {
            saved_queries,
            ..self.clone()
        }
    }

    pub fn without_saved_query(&self, name: &str) -> Self {
        Self {
            saved_queries: self
                .saved_queries
                .iter()
                .filter(|q| q.name != name)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Returns a copy with the saved query's filters applied.
    pub fn with_applied_query(&self, saved: &SavedQuery) -> Self {
        Self {
            search_query: saved.query.clone(),
            selected_category: saved.category.clone(),
            view_mode: saved.view_mode,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_snapshot() {
        let snapshot = ViewSnapshot::new();
        assert_eq!(snapshot.search_query, "");
        assert_eq!(snapshot.view_mode, ViewMode::All);
        assert_eq!(snapshot.density, Density::Full);
        assert_eq!(snapshot.velocity_window.hours(), 24);
        assert!(snapshot.favorites.is_empty());
    }

    #[test]
    fn test_toggle_favorite_leaves_original_untouched() {
        let original = ViewSnapshot::new();
        let added = original.with_favorite_toggled("f1");
        let removed = added.with_favorite_toggled("f1");

        assert!(original.favorites.is_empty());
        assert!(added.is_favorite("f1"));
        assert!(!removed.is_favorite("f1"));
    }

    #[test]
    fn test_velocity_window_validation() {
        assert_eq!(VelocityWindow::try_from(72).unwrap().hours(), 72);
        assert!(VelocityWindow::try_from(5).unwrap_err().is_validation());
        assert_eq!(VelocityWindow::default().to_string(), "24h");
    }

    #[test]
    fn test_velocity_window_serde_rejects_unknown_hours() {
        assert!(serde_json::from_str::<VelocityWindow>("6").is_ok());
        assert!(serde_json::from_str::<VelocityWindow>("7").is_err());
        assert_eq!(
            serde_json::to_string(&VelocityWindow::default()).unwrap(),
            "24"
        );
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(ViewMode::from_str("favorites").unwrap(), ViewMode::Favorites);
        assert_eq!(Density::from_str("compact").unwrap(), Density::Compact);
        assert!(Density::from_str("dense").is_err());
    }

    #[test]
    fn test_saved_query_replaces_by_name() {
        let now = Utc::now();
        let snapshot = ViewSnapshot {
            search_query: "council".into(),
            ..ViewSnapshot::default()
        };
        let saved = snapshot.with_saved_query("meetings", now);
        let updated = ViewSnapshot {
            search_query: "zoning".into(),
            ..saved.clone()
        }
        .with_saved_query("meetings", now);

        assert_eq!(updated.saved_queries.len(), 1);
        assert_eq!(updated.saved_query("meetings").unwrap().query, "zoning");
        assert!(updated.without_saved_query("meetings").saved_queries.is_empty());
    }
}
