//! MAL Scraper CLI application.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mal_scraper::{write_workbook, MalClient, MalScraper, ScraperStats};
use shared::{Batch, Config, LogConfig, OutputPaths, Season};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Originals, adaptations and sequels of a FAL season
    Typed {
        /// Batch file with a [typed] section
        #[arg(short, long)]
        batch: PathBuf,
    },
    /// Every TV show of a broadcast season
    Season {
        /// Batch file with a [season] section
        #[arg(short, long)]
        batch: Option<PathBuf>,

        /// Season year (defaults to the upcoming season)
        #[arg(long, requires = "season")]
        year: Option<i32>,

        /// winter, spring, summer or fall
        #[arg(long, requires = "year")]
        season: Option<Season>,
    },
    /// Watch-status breakdown of a fixed list of shows
    Watchlist {
        /// Batch file with a [watchlist] section
        #[arg(short, long)]
        batch: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Credentials may live in a .env file next to the config
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    shared::logging::init(LogConfig::from_settings(
        &config.logging,
        &config.log_dir(),
        "mal-scraper",
        args.verbose,
    ))?;

    info!("MAL Scraper starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    let paths = OutputPaths::new(config.output_dir());
    paths
        .create_dirs()
        .context("Failed to create output directories")?;
    info!(output_dir = %paths.root().display(), "Output directory ready");

    // Initialize API client
    let client_id = config.client_id()?;
    let client = MalClient::new(
        config.mal_api.base_url.clone(),
        &client_id,
        Duration::from_secs(config.mal_api.timeout_secs),
    )
    .context("Failed to create MAL client")?;

    let scraper = MalScraper::new(client, config.catalog, config.mal_api.season_limit);
    let now = chrono::Local::now().naive_local();

    let (sheets, path, stats) = match args.command {
        Command::Typed { batch } => {
            let typed = Batch::from_file(&batch)?
                .typed
                .with_context(|| format!("No [typed] section in {}", batch.display()))?;
            info!(entries = typed.total(), "Typed batch loaded");
            let (sheets, stats) = scraper.typed_report(&typed).await;
            (sheets, paths.typed_report(now), stats)
        }
        Command::Season {
            batch,
            year,
            season,
        } => {
            let adjustments = match batch {
                Some(batch) => Batch::from_file(&batch)?.season.unwrap_or_default(),
                None => Default::default(),
            };
            let (season, year) = match (season, year) {
                (Some(season), Some(year)) => (season, year),
                _ => Season::upcoming(now.date()),
            };
            let (sheet, stats) = scraper
                .season_report(year, season, &adjustments)
                .await
                .context("Season report failed")?;
            (vec![sheet], paths.season_report(season, year, adjustments.fal), stats)
        }
        Command::Watchlist { batch } => {
            let watchlist = Batch::from_file(&batch)?
                .watchlist
                .with_context(|| format!("No [watchlist] section in {}", batch.display()))?;
            let (sheet, stats) = scraper.watchlist_report(&watchlist).await;
            (vec![sheet], paths.watchlist_report(&watchlist.name, now), stats)
        }
    };

    write_workbook(&sheets, &path)?;

    report_stats(&stats);
    info!(path = %path.display(), "MAL Scraper finished successfully");

    Ok(())
}

fn report_stats(stats: &ScraperStats) {
    info!("=== Scraping Complete ===");
    info!("Entries requested: {}", stats.requested);
    info!("Entries built: {}", stats.built);
    info!("Errors: {}", stats.errors);
}
