//! Time ranges and fetch-window iteration.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::TimeRangeError;

/// Seconds in one UTC day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// A closed interval `[from_ts, to_ts]` in UTC seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start, UTC seconds (inclusive).
    pub from_ts: i64,
    /// End, UTC seconds (inclusive).
    pub to_ts: i64,
}

impl TimeRange {
    /// Creates a new range, validating that from <= to.
    ///
    /// # Errors
    ///
    /// Returns an error if `from_ts > to_ts`.
    pub const fn new(from_ts: i64, to_ts: i64) -> Result<Self, TimeRangeError> {
        if from_ts > to_ts {
            return Err(TimeRangeError::InvalidRange { from_ts, to_ts });
        }
        Ok(Self { from_ts, to_ts })
    }

    /// Creates a range from two calendar dates at UTC midnight.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, TimeRangeError> {
        Self::new(date_to_unix(start), date_to_unix(end))
    }

    /// Parses two `YYYY-MM-DD` strings into a range.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is malformed or start > end.
    pub fn parse_dates(start: &str, end: &str) -> Result<Self, TimeRangeError> {
        Self::from_dates(parse_date(start)?, parse_date(end)?)
    }

    /// Creates the range `[now - days, now]`.
    ///
    /// Negative lookbacks are treated as zero.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::LookbackOverflow`] if `now - days` falls
    /// outside the representable date range.
    pub fn lookback(now: DateTime<Utc>, days: i64) -> Result<Self, TimeRangeError> {
        let start = TimeDelta::try_days(days.max(0))
            .and_then(|delta| now.checked_sub_signed(delta))
            .ok_or(TimeRangeError::LookbackOverflow(days))?;
        Ok(Self {
            from_ts: start.timestamp(),
            to_ts: now.timestamp(),
        })
    }

    /// Returns the span in seconds.
    #[must_use]
    pub const fn duration_seconds(&self) -> i64 {
        self.to_ts - self.from_ts
    }

    /// Returns true if the span is longer than `chunk_days` days.
    #[must_use]
    pub const fn exceeds_days(&self, chunk_days: i64) -> bool {
        self.duration_seconds() > chunk_seconds(chunk_days)
    }

    /// Returns an iterator over contiguous fetch windows of at most
    /// `chunk_days` days covering `[from_ts, to_ts)`.
    ///
    /// `chunk_days <= 0` is treated as one day.
    #[must_use]
    pub const fn windows(&self, chunk_days: i64) -> WindowIterator {
        WindowIterator {
            current: self.from_ts,
            end: self.to_ts,
            step: chunk_seconds(chunk_days),
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.from_ts, self.to_ts)
    }
}

const fn chunk_seconds(chunk_days: i64) -> i64 {
    let days = if chunk_days <= 0 { 1 } else { chunk_days };
    days.saturating_mul(SECONDS_PER_DAY)
}

/// A half-open fetch window `[start, end)` in UTC seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Window start (inclusive).
    pub start: i64,
    /// Window end (exclusive).
    pub end: i64,
}

/// Iterator over contiguous fetch windows.
#[derive(Debug, Clone)]
pub struct WindowIterator {
    current: i64,
    end: i64,
    step: i64,
}

impl Iterator for WindowIterator {
    type Item = Window;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.end {
            return None;
        }

        let start = self.current;
        let end = start.saturating_add(self.step).min(self.end);
        self.current = end;
        Some(Window { start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.current >= self.end {
            return (0, Some(0));
        }
        let span = self.end.abs_diff(self.current);
        let count = span.div_ceil(self.step.unsigned_abs()) as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for WindowIterator {}

/// Converts a calendar date to the Unix timestamp of its UTC midnight.
#[must_use]
pub fn date_to_unix(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

/// Converts a millisecond timestamp to its UTC calendar date.
///
/// Returns `None` for timestamps outside chrono's representable range.
#[must_use]
pub fn unix_ms_to_date(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}

fn parse_date(s: &str) -> Result<NaiveDate, TimeRangeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| TimeRangeError::InvalidDate(s.to_string()))
}
