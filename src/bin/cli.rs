//! tagminer CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tagminer::{
    error::Result,
    models::{Config, NsfwLevel},
    pipeline,
    storage::{CatalogStorage, LocalStorage},
};

/// tagminer - Artist catalog tag miner
#[derive(Parser, Debug)]
#[command(
    name = "tagminer",
    version,
    about = "Mines Danbooru tag searches to enrich the artist catalog"
)]

struct Cli {
    /// Path to the data directory containing config and catalog files
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mine target tags and merge the results into the catalog
    Sync {
        /// Input catalog file (default: {data_dir}/artists.json)
        #[arg(long)]
        catalog: Option<String>,

        /// Output catalog file (default: {data_dir}/updated_artists.json)
        #[arg(long)]
        output: Option<String>,
    },

    /// Refresh the published kink-tag list
    Tags,

    /// Validate configuration files
    Validate,

    /// Show catalog summary
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("tagminer starting...");

    // Load configuration
    let config_path = cli.data_dir.join("config.toml");
    let mut config = Config::load_or_default(&config_path);

    match cli.command {
        Command::Sync { catalog, output } => {
            if let Some(path) = catalog {
                config.paths.catalog_file = path;
            }
            if let Some(path) = output {
                config.paths.output_file = path;
            }
            config.validate()?;

            let config = Arc::new(config);
            let storage = LocalStorage::new(&cli.data_dir, config.paths.clone());
            pipeline::run_sync(Arc::clone(&config), &storage).await?;
        }

        Command::Tags => {
            config.validate()?;

            let config = Arc::new(config);
            let storage = LocalStorage::new(&cli.data_dir, config.paths.clone());
            pipeline::run_tag_refresh(Arc::clone(&config), &storage).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} target tags, {} core tags, {} extra candidates)",
                config.tags.target_tags.len(),
                config.tags.core_tags.len(),
                config.tags.extra_tags.len()
            );

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Data directory: {}", cli.data_dir.display());

            let storage = LocalStorage::new(&cli.data_dir, config.paths.clone());
            match storage.load_catalog().await {
                Ok(catalog) => {
                    let distinct_tags: std::collections::BTreeSet<&String> =
                        catalog.iter().flat_map(|a| a.kink_tags.iter()).collect();

                    log::info!("Catalog: {} artists", catalog.len());
                    log::info!("Distinct kink tags: {}", distinct_tags.len());
                    for level in [
                        NsfwLevel::Unset,
                        NsfwLevel::Suggestive,
                        NsfwLevel::Ecchi,
                        NsfwLevel::Hentai,
                        NsfwLevel::Extreme,
                    ] {
                        let count = catalog.iter().filter(|a| a.nsfw_level == level).count();
                        if count > 0 {
                            log::info!("  {}: {}", level, count);
                        }
                    }
                }
                Err(e) => log::warn!("No catalog to summarize: {}", e),
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
