//! CoinGecko data acquisition for marketmint.
//!
//! This crate provides the raw-series fetch path:
//!
//! - [`url`] - CoinGecko market-chart URLs
//! - [`CoinGeckoClient`] - HTTP client with retries, backoff and a response cache
//! - [`parse_market_chart`] - Market-chart JSON into a [`RawSeries`]
//! - [`RawFetcher`] - The seam the pipeline fetches through
//! - [`fetch_chunked`] / [`fetch_span`] - Windowed fetching of long ranges
//!
//! [`RawSeries`]: marketmint_types::RawSeries

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marketmint/marketmint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod chunk;
mod client;
mod parse;
pub mod url;

pub use cache::ResponseCache;
pub use chunk::{RawFetcher, fetch_chunked, fetch_span};
pub use client::{ClientConfig, CoinGeckoClient, FetchError};
pub use parse::parse_market_chart;
pub use url::ChartDays;
