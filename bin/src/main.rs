//! marketmint CLI - CoinGecko OHLCV bars and technical-analysis features.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use marketmint_lib::{ClientConfig, CoinGeckoClient};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod display;
mod pipeline;

use cli::Cli;
use config::{FileConfig, RunSettings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_target(false)
        .init();

    let file = FileConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    let settings = RunSettings::resolve(&cli, file, Utc::now()).context("Invalid settings")?;
    tracing::debug!(?settings, "resolved settings");

    let client = CoinGeckoClient::new(ClientConfig {
        cache_ttl: Duration::from_secs(settings.cache_seconds),
        cache_dir: settings.cache_dir.clone(),
        ..ClientConfig::default()
    })
    .context("Failed to create HTTP client")?;

    let progress = pipeline::progress_bar(settings.assets.len(), cli.quiet);
    let summary = pipeline::run(&client, &settings, &progress).await;

    if !cli.quiet {
        println!();
        println!("Summary:");
        for saved in &summary.saved {
            println!("  {} -> {} ({} rows)", saved.asset, saved.path.display(), saved.rows);
        }
        for (asset, err) in &summary.failed {
            println!("  {asset}: FAILED ({err:#})");
        }
        println!(
            "Completed: {} succeeded, {} failed",
            summary.saved.len(),
            summary.failed.len()
        );
    }

    if !summary.failed.is_empty() {
        bail!(
            "{} of {} assets failed",
            summary.failed.len(),
            summary.total()
        );
    }
    Ok(())
}
