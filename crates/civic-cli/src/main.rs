use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use civic_core::{Dashboard, DashboardConfig};
use civic_infrastructure::{CivicPaths, ConfigService, FileKeyValueStore};

mod commands;

use commands::action::Action;

#[derive(Parser)]
#[command(name = "civic")]
#[command(about = "Civic Dash - inspect and edit the dashboard's persisted UI state", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the persisted state files
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current state of every store
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List modules in display order
    Modules,
    /// Remove all persisted state
    Clear,
    /// Start an interactive shell with undo/redo
    Shell,
    #[command(flatten)]
    Action(Action),
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let service = match &cli.config {
        Some(path) => ConfigService::new(path.clone()),
        None => ConfigService::from_default_location()?,
    };
    service
        .get_config()
        .with_context(|| format!("Failed to load {}", service.path().display()))
}

fn storage_dir(cli: &Cli, config: &DashboardConfig) -> Result<PathBuf> {
    if let Some(dir) = cli.storage_dir.clone().or_else(|| config.storage_dir.clone()) {
        return Ok(dir);
    }
    Ok(CivicPaths::state_dir()?)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let storage = Arc::new(FileKeyValueStore::new(storage_dir(&cli, &config)?));
    tracing::info!(root = %storage.root().display(), "using storage directory");
    let mut dashboard = Dashboard::open(storage, &config);

    match cli.command {
        Commands::Show { json } => commands::render::show(&dashboard, json)?,
        Commands::Modules => commands::render::modules(&dashboard),
        Commands::Clear => {
            dashboard
                .clear_persisted()
                .context("Failed to clear persisted state")?;
            println!("{}", "Cleared persisted state".green());
        }
        Commands::Shell => commands::shell::run(&mut dashboard)?,
        Commands::Action(action) => match action.apply(&mut dashboard) {
            Err(e) if !e.is_persistence() => return Err(e.into()),
            outcome => commands::report(outcome),
        },
    }

    Ok(())
}
