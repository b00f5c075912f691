//! Daily and weekly OHLCV resampling for marketmint.
//!
//! This crate provides point-to-bar aggregation:
//!
//! - [`Bar`] - OHLCV bar for one calendar period
//! - [`resample_daily`] - Raw price/volume points to UTC calendar-day bars
//! - [`reaggregate_weekly`] - Daily bars to weeks ending Sunday
//! - [`resample`] - Daily resampling followed by weekly reaggregation when requested

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marketmint/marketmint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod builder;
mod daily;
mod weekly;

pub use bar::{Bar, BarTable};
pub use daily::resample_daily;
pub use weekly::{reaggregate_weekly, week_ending_sunday};

use marketmint_types::{Frequency, RawSeries};

/// Resamples a raw series to bars of the given frequency.
///
/// Weekly bars are always built from daily bars, never from raw points.
#[must_use]
pub fn resample(series: &RawSeries, frequency: Frequency) -> BarTable {
    let daily = resample_daily(series);
    match frequency {
        Frequency::Daily => daily,
        Frequency::Weekly => reaggregate_weekly(&daily),
    }
}
