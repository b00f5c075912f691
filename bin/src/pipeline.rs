//! Per-asset fetch, resample, feature and save loop.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use marketmint_lib::{AssetId, RawFetcher, build_table, fetch_span, resolve_output_path_with_extension};
use std::path::PathBuf;

use crate::config::RunSettings;
use crate::display::{preview, write_table_file};

const PREVIEW_ROWS: usize = 5;

/// A saved table.
#[derive(Debug)]
pub(crate) struct Saved {
    pub(crate) asset: AssetId,
    pub(crate) path: PathBuf,
    pub(crate) rows: usize,
}

/// Outcome of a run over every requested asset.
#[derive(Debug, Default)]
pub(crate) struct RunSummary {
    pub(crate) saved: Vec<Saved>,
    pub(crate) failed: Vec<(AssetId, anyhow::Error)>,
}

impl RunSummary {
    pub(crate) fn total(&self) -> usize {
        self.saved.len() + self.failed.len()
    }
}

/// Creates the per-asset progress bar, hidden in quiet mode.
pub(crate) fn progress_bar(len: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.set_prefix("assets");
    pb
}

/// Processes every asset in order. A failing asset is recorded and the
/// remaining assets still run.
pub(crate) async fn run<F: RawFetcher + ?Sized>(
    fetcher: &F,
    settings: &RunSettings,
    progress: &ProgressBar,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for asset in &settings.assets {
        progress.set_message(asset.to_string());
        match process_asset(fetcher, settings, asset).await {
            Ok(saved) => summary.saved.push(saved),
            Err(e) => {
                tracing::error!(asset = %asset, "{e:#}");
                summary.failed.push((asset.clone(), e));
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    summary
}

async fn process_asset<F: RawFetcher + ?Sized>(
    fetcher: &F,
    settings: &RunSettings,
    asset: &AssetId,
) -> Result<Saved> {
    let range = settings.range;
    tracing::info!(
        "Fetching {} / {} from {} to {}",
        asset.as_str().to_uppercase(),
        settings.vs_currency.to_uppercase(),
        range.from_ts,
        range.to_ts
    );

    let series = fetch_span(
        fetcher,
        asset,
        &settings.vs_currency,
        range,
        settings.chunk_days,
        settings.chunk_sleep,
    )
    .await
    .with_context(|| format!("Failed to fetch {asset}"))?;

    if let Err(e) = series.validate() {
        tracing::warn!(asset = %asset, "{e}; bars are built by timestamp");
    }

    let table = build_table(&series, settings.frequency, settings.features);
    tracing::info!(asset = %asset, "Rows: {}", table.len());
    if !table.is_empty() {
        tracing::info!("\n{}", preview(&table, PREVIEW_ROWS));
    }

    let path = resolve_output_path_with_extension(
        &settings.output_path,
        asset.as_str(),
        settings.is_multi(),
        settings.format.extension(),
    );
    write_table_file(&table, &path, settings.format)?;
    tracing::info!(asset = %asset, "Saved: {}", path.display());

    Ok(Saved {
        asset: asset.clone(),
        path,
        rows: table.len(),
    })
}
