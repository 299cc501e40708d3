//! Mizo Archive CLI
//!
//! Local entry point: runs the intro gate, loads the manifest and manages
//! favorites in the storage directory.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use mizo_archive::{
    error::Result,
    models::{ArchiveItem, Config, IntroPortal},
    services::{ArchiveView, FavoritesStore, ManifestFetcher},
    storage::LocalPreferences,
};

/// Mizo Archive - media archive browser
#[derive(Parser, Debug)]
#[command(name = "mizo-archive", version, about = "Mizo media archive browser")]
struct Cli {
    /// Path to storage directory containing config and preferences
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Skip the intro gate
    #[arg(long, global = true)]
    skip_intro: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the archive and print the featured and matching items
    List {
        /// Free-text search over titles, years and tags
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Toggle an item as favorite
    Heart {
        /// Item id from the manifest
        id: String,
    },

    /// Print favorited ids
    Hearts,

    /// Validate configuration files
    Validate,

    /// Show storage and manifest info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_item(item: &ArchiveItem, favorite: bool, tag_limit: usize) {
    let marker = if favorite { "♥" } else { " " };
    println!(
        "{} {}",
        marker,
        item.format("{id}  [{year}] {title}  {tags}", tag_limit)
    );
    println!("      {}", item.url);
}

/// Play the intro gate: tap, then wait out the explosion.
async fn run_intro(config: &Config) {
    let mut portal = IntroPortal::new(std::time::Duration::from_millis(
        config.intro.explode_delay_ms,
    ));
    portal.press();
    log::debug!("Intro portal {}", portal.state().as_str());

    if let Some(delay) = portal.tap() {
        log::debug!("Intro portal {}, revealing archive", portal.state().as_str());
        tokio::time::sleep(delay).await;
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::debug!("Loaded configuration from {}", cli.storage_dir.display());

    let prefs = LocalPreferences::new(cli.storage_dir.join(&config.favorites.preferences_file));
    let mut favorites = FavoritesStore::open(prefs, config.favorites.storage_key.clone());

    match cli.command {
        Command::List { query } => {
            if config.intro.enabled && !cli.skip_intro {
                run_intro(&config).await;
            }

            let fetcher = Arc::new(ManifestFetcher::from_config(&config)?);
            let mut view = ArchiveView::new(favorites);

            view.begin_load(fetcher);
            log::info!("Querying the archive...");
            view.complete_load().await;
            view.set_query(query);

            let stats = view.stats();
            let tag_limit = config.display.tag_preview;
            let hearts = view.favorites().ids().clone();
            let snapshot = view.snapshot();

            if snapshot.show_featured {
                println!("== Curated ({}) ==", snapshot.featured.len());
                for item in &snapshot.featured {
                    print_item(item, true, tag_limit);
                }
                println!();
            }

            println!("== Records ({}) ==", snapshot.filtered.len());
            if snapshot.filtered.is_empty() {
                println!("No records match the current search.");
            }
            for item in &snapshot.filtered {
                print_item(item, hearts.contains(&item.id), tag_limit);
            }

            log::info!(
                "Records: {}, Curation: {}",
                stats.records,
                stats.curated
            );
        }

        Command::Heart { id } => {
            let favorited = favorites.toggle(&id)?;
            log::info!(
                "{} {} ({} favorites)",
                if favorited { "Hearted" } else { "Unhearted" },
                id,
                favorites.len()
            );
        }

        Command::Hearts => {
            if favorites.is_empty() {
                log::info!("No favorites yet.");
            }
            for id in favorites.ids() {
                println!("{id}");
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!("Manifest: {}", config.manifest.manifest_url());
            log::info!("Asset base: {}", config.manifest.asset_base());
            log::info!(
                "Favorites: {} under key {}",
                favorites.len(),
                favorites.key()
            );
        }
    }

    Ok(())
}
