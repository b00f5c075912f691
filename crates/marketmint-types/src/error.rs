//! Error types for marketmint.

use thiserror::Error;

/// Result type alias for marketmint operations.
pub type Result<T> = std::result::Result<T, MarketmintError>;

/// Errors that can occur while acquiring and processing market data.
#[derive(Error, Debug)]
pub enum MarketmintError {
    /// Invalid time range.
    #[error(transparent)]
    TimeRange(#[from] TimeRangeError),

    /// A point sequence has a timestamp earlier than its predecessor.
    #[error("{series} points are out of order at index {index}: {timestamp_ms} < {previous_ms}")]
    UnorderedSeries {
        /// Which sequence was out of order ("price" or "volume").
        series: &'static str,
        /// Index of the offending point.
        index: usize,
        /// Timestamp of the offending point.
        timestamp_ms: i64,
        /// Timestamp of the point before it.
        previous_ms: i64,
    },
}

/// Error for invalid time ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// Start is after end.
    #[error("Invalid time range: {from_ts} > {to_ts}")]
    InvalidRange {
        /// Start, UTC seconds.
        from_ts: i64,
        /// End, UTC seconds.
        to_ts: i64,
    },

    /// Date string was not `YYYY-MM-DD`.
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Lookback reaches past the representable date range.
    #[error("Lookback of {0} days is out of range")]
    LookbackOverflow(i64),
}
