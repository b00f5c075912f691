//! CoinGecko OHLCV bars and technical-analysis features.
//!
//! This is a facade crate that re-exports functionality from the marketmint
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use marketmint_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinGeckoClient::with_defaults()?;
//!     let asset = AssetRegistry::global().resolve("gold");
//!
//!     let table = fetch_ohlcv(&client, &asset, "usd", 90, Frequency::Weekly, true).await?;
//!     for row in &table.rows {
//!         println!("{} close={} rsi={:?}", row.bar.date, row.bar.close, row.rsi_14);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marketmint/marketmint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(all(feature = "aggregate", feature = "features"))]
mod ohlcv;

// Re-export core types
pub use marketmint_types::*;

// Re-export asset registry
pub use marketmint_assets::{AssetId, AssetRegistry, DEFAULT_ASSET};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use marketmint_fetch::{
    ChartDays, ClientConfig, CoinGeckoClient, FetchError, RawFetcher, ResponseCache,
    fetch_chunked, fetch_span, parse_market_chart,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use marketmint_aggregate::{Bar, BarTable, reaggregate_weekly, resample, resample_daily};

// Re-export features
#[cfg(feature = "features")]
pub use marketmint_features::{
    BAR_COLUMNS, FeatureColumn, FeatureRow, FeatureTable, compute_features,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use marketmint_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, read_csv_table,
    resolve_output_path, resolve_output_path_with_extension, write_table,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use marketmint_format::ParquetFormatter;

#[cfg(all(feature = "aggregate", feature = "features"))]
pub use ohlcv::build_table;

#[cfg(feature = "fetch")]
pub use ohlcv::{GOLD_ASSET, fetch_ohlcv, weekly_gold_features};

/// Prelude module for convenient imports.
///
/// ```
/// use marketmint_lib::prelude::*;
/// ```
pub mod prelude {
    pub use marketmint_types::{
        Frequency, MarketmintError, RawPoint, RawSeries, Result, TimeRange, TimeRangeError,
    };

    pub use marketmint_assets::{AssetId, AssetRegistry};

    #[cfg(feature = "fetch")]
    pub use marketmint_fetch::{ClientConfig, CoinGeckoClient, RawFetcher, fetch_span};

    #[cfg(feature = "aggregate")]
    pub use marketmint_aggregate::{Bar, reaggregate_weekly, resample_daily};

    #[cfg(feature = "features")]
    pub use marketmint_features::{FeatureRow, FeatureTable, compute_features};

    #[cfg(feature = "format")]
    pub use marketmint_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use marketmint_format::ParquetFormatter;

    #[cfg(feature = "fetch")]
    pub use crate::{fetch_ohlcv, weekly_gold_features};
}
