//! OHLCV bar data structure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An ordered table of bars with strictly increasing dates.
pub type BarTable = Vec<Bar>;

/// OHLCV bar for one calendar period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Period label: the UTC day for daily bars, the closing Sunday for weekly bars.
    pub date: NaiveDate,
    /// First price of the period.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Last price of the period.
    pub close: f64,
    /// Summed volume, zero when the period had no volume points.
    pub volume: f64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns true if open and close both lie within `[low, high]`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
    }
}
