//! YAML config loading and merging with command-line flags.

use chrono::{DateTime, Utc};
use marketmint_lib::{
    AssetId, AssetRegistry, DEFAULT_ASSET, FormatError, Frequency, FrequencyParseError,
    OutputFormat, TimeRange, TimeRangeError,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::cli::Cli;

const DEFAULT_VS_CURRENCY: &str = "usd";
const DEFAULT_LOOKBACK_DAYS: i64 = 30;
const DEFAULT_CACHE_SECONDS: u64 = 3600;
const DEFAULT_OUTPUT_PATH: &str = "data/ohlcv.csv";
const DEFAULT_CHUNK_SLEEP_SECONDS: f64 = 1.0;

/// Errors raised before any fetch starts.
#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    TimeRange(#[from] TimeRangeError),

    #[error(transparent)]
    Frequency(#[from] FrequencyParseError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// The `date` section: a lookback or an explicit start/end pair.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DateConfig {
    pub(crate) lookback_days: Option<i64>,
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
}

/// Values read from the YAML config file. Absent keys are `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FileConfig {
    pub(crate) tickers: Option<Vec<String>>,
    pub(crate) vs_currency: Option<String>,
    pub(crate) date: Option<DateConfig>,
    pub(crate) frequency: Option<String>,
    pub(crate) features: Option<bool>,
    pub(crate) cache_seconds: Option<u64>,
    pub(crate) output_path: Option<String>,
    pub(crate) chunk_days: Option<i64>,
    pub(crate) chunk_sleep_seconds: Option<f64>,
    pub(crate) format: Option<String>,
    pub(crate) cache_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Loads `path`; a missing file is an empty config.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses YAML text; a document with no keys is an empty config.
    pub(crate) fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        let has_content = text
            .lines()
            .map(str::trim)
            .any(|l| !l.is_empty() && !l.starts_with('#') && l != "---");
        if !has_content {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub(crate) assets: Vec<AssetId>,
    pub(crate) vs_currency: String,
    pub(crate) range: TimeRange,
    pub(crate) frequency: Frequency,
    pub(crate) features: bool,
    pub(crate) cache_seconds: u64,
    pub(crate) output_path: String,
    pub(crate) chunk_days: Option<i64>,
    pub(crate) chunk_sleep: Duration,
    pub(crate) format: OutputFormat,
    pub(crate) cache_dir: Option<PathBuf>,
}

impl RunSettings {
    /// Merges flags over the config file over defaults.
    pub(crate) fn resolve(cli: &Cli, file: FileConfig, now: DateTime<Utc>) -> Result<Self, ConfigError> {
        let registry = AssetRegistry::global();
        let mut assets = if let Some(coin) = &cli.coin_id {
            vec![registry.resolve(coin)]
        } else if let Some(list) = &cli.tickers {
            registry.resolve_list(list)
        } else {
            file.tickers
                .unwrap_or_default()
                .into_iter()
                .filter(|t| !t.trim().is_empty())
                .map(|t| registry.resolve(&t))
                .collect()
        };
        if assets.is_empty() {
            assets.push(registry.resolve(DEFAULT_ASSET));
        }

        let date = file.date.unwrap_or_default();
        let range = match (cli.start.as_ref().or(date.start.as_ref()), cli.end.as_ref().or(date.end.as_ref())) {
            (Some(start), Some(end)) => TimeRange::parse_dates(start, end)?,
            (start, end) => {
                if start.is_some() || end.is_some() {
                    tracing::warn!("start and end must both be set for an explicit range, using lookback");
                }
                let days = cli.days.or(date.lookback_days).unwrap_or(DEFAULT_LOOKBACK_DAYS);
                if days < 0 {
                    return Err(ConfigError::Invalid {
                        key: "lookback_days",
                        message: format!("{days} is negative"),
                    });
                }
                TimeRange::lookback(now, days)?
            }
        };

        let frequency = match cli.freq.as_deref().or(file.frequency.as_deref()) {
            Some(s) => s.parse()?,
            None => Frequency::default(),
        };

        let output_path = cli
            .out
            .clone()
            .or(file.output_path)
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        let format = match (cli.format, file.format.as_deref()) {
            (Some(format), _) => format.into(),
            (None, Some(s)) => s.parse()?,
            (None, None) => infer_format(&output_path),
        };

        let sleep_seconds = cli
            .chunk_sleep
            .or(file.chunk_sleep_seconds)
            .unwrap_or(DEFAULT_CHUNK_SLEEP_SECONDS);
        let chunk_sleep = Duration::try_from_secs_f64(sleep_seconds).map_err(|e| ConfigError::Invalid {
            key: "chunk_sleep_seconds",
            message: e.to_string(),
        })?;

        Ok(Self {
            assets,
            vs_currency: cli
                .vs
                .clone()
                .or(file.vs_currency)
                .unwrap_or_else(|| DEFAULT_VS_CURRENCY.to_string())
                .to_lowercase(),
            range,
            frequency,
            features: cli.features || file.features.unwrap_or(false),
            cache_seconds: cli
                .cache_seconds
                .or(file.cache_seconds)
                .unwrap_or(DEFAULT_CACHE_SECONDS),
            output_path,
            chunk_days: cli.chunk_days.or(file.chunk_days),
            chunk_sleep,
            format,
            cache_dir: cli.cache_dir.clone().or(file.cache_dir),
        })
    }

    /// Returns true when more than one asset is requested.
    pub(crate) fn is_multi(&self) -> bool {
        self.assets.len() > 1
    }
}

/// Picks the format named by the output path's extension, CSV otherwise.
fn infer_format(output_path: &str) -> OutputFormat {
    Path::new(output_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
        .unwrap_or_default()
}
