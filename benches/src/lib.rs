//! Synthetic market data for the marketmint benchmarks.

use marketmint_lib::{RawPoint, RawSeries};

/// 2020-01-06T00:00:00Z, a Monday, in milliseconds.
pub const START_MS: i64 = 1_578_268_800_000;

const HOUR_MS: i64 = 3_600_000;

/// Builds an hourly price and volume series spanning `days` days.
///
/// Prices follow a deterministic oscillating walk so that the crossover and
/// RSI paths both see gains and losses.
#[must_use]
pub fn hourly_series(days: usize) -> RawSeries {
    let points = days * 24;
    let mut prices = Vec::with_capacity(points);
    let mut volumes = Vec::with_capacity(points);
    let mut price = 2000.0_f64;

    for i in 0..points {
        let ts = START_MS + i as i64 * HOUR_MS;
        let phase = i as f64 / 37.0;
        price *= 1.0 + 0.004 * phase.sin() + 0.001 * (phase * 3.1).cos();
        prices.push(RawPoint::new(ts, price));
        volumes.push(RawPoint::new(ts, 1_000.0 + (i % 24) as f64 * 25.0));
    }

    RawSeries::new(prices, volumes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_series_shape() {
        let series = hourly_series(3);
        assert_eq!(series.prices.len(), 72);
        assert_eq!(series.volumes.len(), 72);
        assert!(series.validate().is_ok());
        assert!(series.prices.iter().all(|p| p.value > 0.0));
    }
}
