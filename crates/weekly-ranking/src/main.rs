//! Weekly ranking CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use shared::{Config, LogConfig, WeeklyPaths};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Re-key a MAL weekly ranking export by title", long_about = None)]
struct Args {
    /// Week number; reads week-{n}.csv from the input directory
    week: u32,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    shared::logging::init(LogConfig::from_settings(
        &config.logging,
        &config.log_dir(),
        "weekly-ranking",
        args.verbose,
    ))?;

    let paths = WeeklyPaths::new(&config.weekly.input_dir, &config.weekly.output_dir);
    std::fs::create_dir_all(paths.output_dir()).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            paths.output_dir().display()
        )
    })?;

    let input = paths.input(args.week);
    let output = paths.output(args.week);
    info!(week = args.week, input = %input.display(), "Re-keying weekly ranking");

    let titles = weekly_ranking::rekey_week(&input, &output)?;

    info!(week = args.week, titles = titles, path = %output.display(), "Done");
    Ok(())
}
