//! Technical-analysis features for marketmint bar tables.
//!
//! - [`compute_features`] - One [`FeatureRow`] per input bar, as a [`FeatureTable`]
//! - [`pct_change`], [`sma`], [`rsi`], [`crossovers`] - The individual
//!   positional rolling computations
//!
//! Every window is positional: a gap in calendar coverage still counts as
//! consecutive rows.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marketmint/marketmint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod rolling;
mod rsi;
mod row;
mod signals;

pub use engine::{FAST_SMA_PERIOD, RSI_PERIOD, SLOW_SMA_PERIOD, compute_features};
pub use rolling::{pct_change, sma};
pub use row::{BAR_COLUMNS, FeatureColumn, FeatureRow, FeatureTable};
pub use rsi::{RSI_EPSILON, rsi};
pub use signals::{CrossFlags, crossovers};
