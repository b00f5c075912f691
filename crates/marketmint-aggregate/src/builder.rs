//! Keyed OHLCV fold shared by the daily and weekly resamplers.

use chrono::NaiveDate;

use crate::Bar;

/// Accumulates one period's OHLCV values.
///
/// Open and close are chosen by the chronological `key` of each
/// contribution, not by arrival order; equal keys keep arrival order.
#[derive(Debug)]
pub(crate) struct BarBuilder {
    open_key: i64,
    close_key: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl BarBuilder {
    /// Creates a builder from the first contribution of a period.
    pub(crate) const fn new(key: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open_key: key,
            close_key: key,
            open,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    /// Folds another contribution into the period.
    pub(crate) fn update(&mut self, key: i64, open: f64, high: f64, low: f64, close: f64) {
        if key < self.open_key {
            self.open_key = key;
            self.open = open;
        }
        if key >= self.close_key {
            self.close_key = key;
            self.close = close;
        }
        self.high = self.high.max(high);
        self.low = self.low.min(low);
    }

    /// Adds volume to the period.
    pub(crate) fn add_volume(&mut self, volume: f64) {
        self.volume += volume;
    }

    /// Finishes building and returns the bar labelled `date`.
    pub(crate) const fn finish(self, date: NaiveDate) -> Bar {
        Bar::new(
            date,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }
}
