//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::display::Format;

/// Fetch OHLCV from CoinGecko and save daily or weekly bars.
///
/// Every flag overrides the matching key of the YAML config file.
#[derive(Debug, Parser)]
#[command(name = "marketmint")]
#[command(about = "Fetch OHLCV from CoinGecko and save daily/weekly bars", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    pub(crate) config: PathBuf,

    /// Single coin id (overrides --tickers and config tickers)
    #[arg(long)]
    pub(crate) coin_id: Option<String>,

    /// Comma-separated list of coin ids (e.g. bitcoin,ethereum)
    #[arg(long)]
    pub(crate) tickers: Option<String>,

    /// Quote currency, e.g. usd
    #[arg(long)]
    pub(crate) vs: Option<String>,

    /// Lookback window in days
    #[arg(long)]
    pub(crate) days: Option<i64>,

    /// Start date YYYY-MM-DD (UTC), used together with --end
    #[arg(long)]
    pub(crate) start: Option<String>,

    /// End date YYYY-MM-DD (UTC), used together with --start
    #[arg(long)]
    pub(crate) end: Option<String>,

    /// Output frequency (daily or weekly)
    #[arg(long)]
    pub(crate) freq: Option<String>,

    /// Add analytics columns (returns, SMA/RSI and crossover signals)
    #[arg(long)]
    pub(crate) features: bool,

    /// Response cache TTL in seconds (0 disables the cache)
    #[arg(long)]
    pub(crate) cache_seconds: Option<u64>,

    /// Output path or directory; use {ticker} to template multi-ticker filenames
    #[arg(long)]
    pub(crate) out: Option<String>,

    /// Split long ranges into windows of this many days
    #[arg(long)]
    pub(crate) chunk_days: Option<i64>,

    /// Seconds to wait between chunked requests
    #[arg(long)]
    pub(crate) chunk_sleep: Option<f64>,

    /// Output format
    #[arg(long, value_enum)]
    pub(crate) format: Option<Format>,

    /// Response cache directory
    #[arg(long)]
    pub(crate) cache_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,

    /// Quiet mode (warnings and errors only, no progress bar)
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

impl Cli {
    /// Returns the default log filter for the verbosity flags.
    pub(crate) const fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
