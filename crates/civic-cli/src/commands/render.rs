//! Text and JSON views of the dashboard state.

use colored::Colorize;
use serde_json::json;

use civic_core::{Dashboard, Undoable};

pub fn show(dashboard: &Dashboard, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&state_json(dashboard))?);
        return Ok(());
    }

    let view = dashboard.view.present();
    println!("{}", "View".bright_magenta().bold());
    println!("  search:     {}", quoted_or_dash(&view.search_query));
    println!(
        "  category:   {}",
        view.selected_category.as_deref().unwrap_or("-")
    );
    println!("  mode:       {}", view.view_mode);
    println!("  density:    {}", view.density);
    println!("  velocity:   {}", view.velocity_window);
    println!(
        "  favorites:  {}",
        if view.favorites.is_empty() {
            "-".to_string()
        } else {
            view.favorites.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    );
    for saved in &view.saved_queries {
        println!(
            "  saved:      {} = {} {}",
            saved.name.bright_cyan(),
            quoted_or_dash(&saved.query),
            saved
                .created_at
                .format("(%Y-%m-%d %H:%M)")
                .to_string()
                .bright_black()
        );
    }

    let enabled = dashboard.modules.enabled_ids().len();
    let total = dashboard.modules.present().modules.len();
    println!("{}", "Modules".bright_magenta().bold());
    println!("  enabled:    {enabled}/{total}");

    println!("{}", "Privacy".bright_magenta().bold());
    println!(
        "  mode:       {}",
        if dashboard.privacy.privacy_mode() {
            "on".yellow()
        } else {
            "off".normal()
        }
    );
    let privacy = dashboard.privacy.present();
    println!(
        "  local votes: {} up / {} down",
        privacy.local_upvotes.values().sum::<u64>(),
        privacy.local_downvotes.values().sum::<u64>()
    );

    println!("{}", "History".bright_magenta().bold());
    for (name, state, can_undo, can_redo) in [
        (
            "view",
            dashboard.view.history_state(),
            dashboard.view.can_undo(),
            dashboard.view.can_redo(),
        ),
        (
            "modules",
            dashboard.modules.history_state(),
            dashboard.modules.can_undo(),
            dashboard.modules.can_redo(),
        ),
        (
            "privacy",
            dashboard.privacy.history_state(),
            dashboard.privacy.can_undo(),
            dashboard.privacy.can_redo(),
        ),
    ] {
        println!("  {name:<10}  {state} (undo: {can_undo}, redo: {can_redo})");
    }
    Ok(())
}

pub fn modules(dashboard: &Dashboard) {
    for module in dashboard.modules.ordered() {
        let marker = if module.enabled {
            "[x]".green()
        } else {
            "[ ]".bright_black()
        };
        println!(
            "{marker} {:<28} {}",
            module.id,
            module.name.bright_black()
        );
    }
}

fn quoted_or_dash(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        format!("\"{text}\"")
    }
}

fn state_json(dashboard: &Dashboard) -> serde_json::Value {
    let view = dashboard.view.present();
    let privacy = dashboard.privacy.present();
    json!({
        "view": {
            "searchQuery": view.search_query,
            "selectedCategory": view.selected_category,
            "viewMode": view.view_mode,
            "favorites": view.favorites,
            "density": view.density,
            "velocityWindow": view.velocity_window,
            "savedQueries": view.saved_queries,
        },
        "modules": dashboard.modules.ordered(),
        "privacy": privacy,
        "history": {
            "view": dashboard.view.history_state().to_string(),
            "modules": dashboard.modules.history_state().to_string(),
            "privacy": dashboard.privacy.history_state().to_string(),
        },
    })
}
