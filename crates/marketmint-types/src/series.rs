//! Raw price and volume series representation.

use serde::{Deserialize, Serialize};

use crate::{MarketmintError, TimeRange};

/// A single observation as emitted by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// Milliseconds since the Unix epoch (UTC).
    pub timestamp_ms: i64,
    /// Observed value (price or volume).
    pub value: f64,
}

impl RawPoint {
    /// Creates a new raw point.
    #[must_use]
    pub const fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
}

/// Price and volume points for one asset over a time range.
///
/// The two sequences are independent: they need not have the same length or
/// share timestamps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSeries {
    /// Price points in upstream order.
    pub prices: Vec<RawPoint>,
    /// Volume points in upstream order.
    pub volumes: Vec<RawPoint>,
    /// Requested range, if known.
    pub range: Option<TimeRange>,
}

impl RawSeries {
    /// Creates a series from price and volume points.
    #[must_use]
    pub const fn new(prices: Vec<RawPoint>, volumes: Vec<RawPoint>) -> Self {
        Self {
            prices,
            volumes,
            range: None,
        }
    }

    /// Creates an empty series covering `range`.
    #[must_use]
    pub const fn empty(range: TimeRange) -> Self {
        Self {
            prices: Vec::new(),
            volumes: Vec::new(),
            range: Some(range),
        }
    }

    /// Sets the requested range.
    #[must_use]
    pub const fn with_range(mut self, range: TimeRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Returns true if there are no price points.
    ///
    /// Volume points alone never produce bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Appends another series' points after this one's.
    pub fn extend(&mut self, other: Self) {
        self.prices.extend(other.prices);
        self.volumes.extend(other.volumes);
    }

    /// Checks that both sequences have non-decreasing timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`MarketmintError::UnorderedSeries`] for the first decreasing
    /// timestamp found.
    pub fn validate(&self) -> Result<(), MarketmintError> {
        check_ordered("price", &self.prices)?;
        check_ordered("volume", &self.volumes)
    }
}

fn check_ordered(series: &'static str, points: &[RawPoint]) -> Result<(), MarketmintError> {
    for (index, pair) in points.windows(2).enumerate() {
        if pair[1].timestamp_ms < pair[0].timestamp_ms {
            return Err(MarketmintError::UnorderedSeries {
                series,
                index: index + 1,
                timestamp_ms: pair[1].timestamp_ms,
                previous_ms: pair[0].timestamp_ms,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_keeps_order() {
        let mut first = RawSeries::new(vec![RawPoint::new(1, 10.0)], vec![]);
        let second = RawSeries::new(
            vec![RawPoint::new(2, 11.0)],
            vec![RawPoint::new(2, 5.0)],
        );
        first.extend(second);

        assert_eq!(first.prices.len(), 2);
        assert_eq!(first.prices[1].timestamp_ms, 2);
        assert_eq!(first.volumes.len(), 1);
    }

    #[test]
    fn test_validate_ordered() {
        let series = RawSeries::new(
            vec![RawPoint::new(1, 1.0), RawPoint::new(1, 2.0), RawPoint::new(3, 3.0)],
            vec![RawPoint::new(5, 1.0)],
        );
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_validate_unordered() {
        let series = RawSeries::new(
            vec![RawPoint::new(1, 1.0)],
            vec![RawPoint::new(5, 1.0), RawPoint::new(4, 1.0)],
        );
        let err = series.validate().unwrap_err();
        assert!(matches!(
            err,
            MarketmintError::UnorderedSeries {
                series: "volume",
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_volume_only_is_empty() {
        let series = RawSeries::new(vec![], vec![RawPoint::new(1, 1.0)]);
        assert!(series.is_empty());
    }
}
