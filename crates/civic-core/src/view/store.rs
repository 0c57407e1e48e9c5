//! View store actions.

use chrono::Utc;

use super::envelope::ViewEnvelope;
use super::model::{Density, MAX_SEARCH_QUERY_LEN, VelocityWindow, ViewMode, ViewSnapshot};
use crate::error::{CivicError, Result};
use crate::store::DomainStore;

pub type ViewStore = DomainStore<ViewEnvelope>;

impl DomainStore<ViewEnvelope> {
    /// Replaces the search text.
    ///
    /// Text longer than [`MAX_SEARCH_QUERY_LEN`] characters is rejected and
    /// nothing is committed.
    pub fn set_search_query(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let len = text.chars().count();
        if len > MAX_SEARCH_QUERY_LEN {
            return Err(CivicError::validation(
                "search_query",
                format!("{} characters exceeds limit of {}", len, MAX_SEARCH_QUERY_LEN),
            ));
        }
        self.commit(|s| ViewSnapshot {
            search_query: text,
            ..s.clone()
        })
    }

    pub fn set_selected_category(&mut self, category: Option<String>) -> Result<()> {
        self.commit(|s| ViewSnapshot {
            selected_category: category,
            ..s.clone()
        })
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) -> Result<()> {
        self.commit(|s| ViewSnapshot {
            view_mode,
            ..s.clone()
        })
    }

    pub fn set_density(&mut self, density: Density) -> Result<()> {
        self.commit(|s| ViewSnapshot {
            density,
            ..s.clone()
        })
    }

    /// Sets the velocity window; hour counts outside
    /// [`VelocityWindow::ALLOWED_HOURS`] are rejected.
    pub fn set_velocity_window(&mut self, hours: u32) -> Result<()> {
        let velocity_window = VelocityWindow::try_from(hours)?;
        self.commit(|s| ViewSnapshot {
            velocity_window,
            ..s.clone()
        })
    }

    /// Adds `id` to favorites, or removes it if already there.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(CivicError::validation("favorite", "source id is empty"));
        }
        self.commit(|s| s.with_favorite_toggled(id))
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.present().is_favorite(id)
    }

    /// Saves the current query, category and view mode under `name`.
    pub fn save_query(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CivicError::validation("saved_query", "name is empty"));
        }
        let created_at = Utc::now();
        self.commit(|s| s.with_saved_query(name, created_at))
    }

    pub fn remove_saved_query(&mut self, name: &str) -> Result<()> {
        if self.present().saved_query(name).is_none() {
            return Err(CivicError::not_found("saved_query", name));
        }
        self.commit(|s| s.without_saved_query(name))
    }

    /// Restores a saved query's filters in a single commit.
    ///
    /// A saved query whose text exceeds [`MAX_SEARCH_QUERY_LEN`] is rejected
    /// and nothing is committed.
    pub fn apply_saved_query(&mut self, name: &str) -> Result<()> {
        let saved = self
            .present()
            .saved_query(name)
            .cloned()
            .ok_or_else(|| CivicError::not_found("saved_query", name))?;
        let len = saved.query.chars().count();
        if len > MAX_SEARCH_QUERY_LEN {
            return Err(CivicError::validation(
                "saved_query",
                format!("{} characters exceeds limit of {}", len, MAX_SEARCH_QUERY_LEN),
            ));
        }
        self.commit(|s| s.with_applied_query(&saved))
    }
}
