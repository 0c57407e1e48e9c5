//! State-changing actions, shared by one-shot subcommands and the shell.

use clap::Subcommand;

use civic_core::Dashboard;
use civic_core::privacy::VoteDirection;
use civic_core::view::{Density, ViewMode};

#[derive(Subcommand, Debug, Clone)]
pub enum Action {
    /// Set the search text (no words clears it)
    Search { words: Vec<String> },
    /// Filter by category (no name clears the filter)
    Category { name: Option<String> },
    /// Switch between `all` and `favorites`
    Mode { mode: ViewMode },
    /// Toggle a source in the favorites set
    Favorite { id: String },
    /// Switch between `full` and `compact` cards
    Density { density: Density },
    /// Set the velocity window in hours (1, 6, 24, 72 or 168)
    Velocity { hours: u32 },
    /// Save the current search under a name
    SaveQuery { name: String },
    /// Restore a saved search
    ApplyQuery { name: String },
    /// Delete a saved search
    RemoveQuery { name: String },
    /// Enable or disable a dashboard module
    ToggleModule { id: String },
    /// Toggle privacy mode
    Privacy,
    /// Record a local vote for a source
    Vote { id: String, direction: VoteDirection },
}

impl Action {
    /// Applies the action and returns a one-line description of the result.
    pub fn apply(self, dashboard: &mut Dashboard) -> civic_core::Result<String> {
        match self {
            Action::Search { words } => {
                let text = words.join(" ");
                dashboard.view.set_search_query(text.as_str())?;
                Ok(if text.is_empty() {
                    "Search cleared".to_string()
                } else {
                    format!("Search: {text}")
                })
            }
            Action::Category { name } => {
                let message = match &name {
                    Some(name) => format!("Category: {name}"),
                    None => "Category filter cleared".to_string(),
                };
                dashboard.view.set_selected_category(name)?;
                Ok(message)
            }
            Action::Mode { mode } => {
                dashboard.view.set_view_mode(mode)?;
                Ok(format!("View mode: {mode}"))
            }
            Action::Favorite { id } => {
                dashboard.view.toggle_favorite(&id)?;
                let state = if dashboard.view.is_favorite(&id) {
                    "added to"
                } else {
                    "removed from"
                };
                Ok(format!("{id} {state} favorites"))
            }
            Action::Density { density } => {
                dashboard.view.set_density(density)?;
                Ok(format!("Density: {density}"))
            }
            Action::Velocity { hours } => {
                dashboard.view.set_velocity_window(hours)?;
                Ok(format!("Velocity window: {}", dashboard.view.present().velocity_window))
            }
            Action::SaveQuery { name } => {
                dashboard.view.save_query(&name)?;
                Ok(format!("Saved query '{}'", name.trim()))
            }
            Action::ApplyQuery { name } => {
                dashboard.view.apply_saved_query(&name)?;
                Ok(format!("Applied query '{name}'"))
            }
            Action::RemoveQuery { name } => {
                dashboard.view.remove_saved_query(&name)?;
                Ok(format!("Removed query '{name}'"))
            }
            Action::ToggleModule { id } => {
                dashboard.modules.toggle_module(&id)?;
                let state = if dashboard.modules.present().is_enabled(&id) {
                    "enabled"
                } else {
                    "disabled"
                };
                Ok(format!("Module {id} {state}"))
            }
            Action::Privacy => {
                dashboard.privacy.toggle_privacy_mode()?;
                let state = if dashboard.privacy.privacy_mode() {
                    "on"
                } else {
                    "off"
                };
                Ok(format!("Privacy mode {state}"))
            }
            Action::Vote { id, direction } => {
                dashboard.privacy.increment_local_vote(&id, direction)?;
                let (up, down) = dashboard.privacy.local_votes(&id);
                Ok(format!("{id}: {up} up / {down} down"))
            }
        }
    }
}
