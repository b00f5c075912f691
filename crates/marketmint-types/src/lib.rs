//! Core types for the marketmint OHLCV pipeline.
//!
//! This crate provides the fundamental data structures used throughout marketmint:
//!
//! - [`RawPoint`] - A single `(timestamp_ms, value)` observation
//! - [`RawSeries`] - Parallel price and volume point sequences for one asset
//! - [`TimeRange`] - A closed UTC interval in seconds, splittable into fetch windows
//! - [`Frequency`] - Output bar frequency (daily or weekly)

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marketmint/marketmint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod frequency;
mod series;
mod time_range;

pub use error::{MarketmintError, Result, TimeRangeError};
pub use frequency::{Frequency, FrequencyParseError};
pub use series::{RawPoint, RawSeries};
pub use time_range::{
    SECONDS_PER_DAY, TimeRange, Window, WindowIterator, date_to_unix, unix_ms_to_date,
};
