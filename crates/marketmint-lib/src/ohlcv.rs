//! One-call helpers from raw series to feature tables.

use marketmint_aggregate::resample;
use marketmint_features::{FeatureTable, compute_features};
use marketmint_types::{Frequency, RawSeries};

#[cfg(feature = "fetch")]
use marketmint_assets::{AssetId, AssetRegistry};
#[cfg(feature = "fetch")]
use marketmint_fetch::{FetchError, RawFetcher};
#[cfg(feature = "fetch")]
use marketmint_types::TimeRange;

/// Asset used by [`weekly_gold_features`].
#[cfg(feature = "fetch")]
pub const GOLD_ASSET: &str = "pax-gold";

/// Resamples a raw series to `frequency` and optionally derives features.
///
/// Without features the table carries bar columns only.
#[must_use]
pub fn build_table(series: &RawSeries, frequency: Frequency, features: bool) -> FeatureTable {
    let bars = resample(series, frequency);
    if features {
        compute_features(&bars, frequency)
    } else {
        FeatureTable::from_bars(&bars)
    }
}

/// Fetches the last `days` days of `asset` against `vs_currency` in one
/// request and builds its table.
///
/// # Errors
///
/// Returns an error if `days` reaches past the representable date range or
/// the fetch fails.
#[cfg(feature = "fetch")]
pub async fn fetch_ohlcv<F: RawFetcher + ?Sized>(
    fetcher: &F,
    asset: &AssetId,
    vs_currency: &str,
    days: i64,
    frequency: Frequency,
    features: bool,
) -> Result<FeatureTable, FetchError> {
    let range = TimeRange::lookback(chrono::Utc::now(), days)?;
    let series = fetcher.fetch_range(asset, vs_currency, range).await?;
    Ok(build_table(&series, frequency, features))
}

/// Weekly PAX Gold features in USD for the last `days` days.
///
/// # Errors
///
/// Returns an error if the fetch fails.
#[cfg(feature = "fetch")]
pub async fn weekly_gold_features<F: RawFetcher + ?Sized>(
    fetcher: &F,
    days: i64,
) -> Result<FeatureTable, FetchError> {
    let asset = AssetRegistry::global().resolve(GOLD_ASSET);
    fetch_ohlcv(fetcher, &asset, "usd", days, Frequency::Weekly, true).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketmint_features::FeatureColumn;
    use marketmint_types::RawPoint;

    const DAY_MS: i64 = 86_400_000;
    // Monday 2024-01-01
    const T0: i64 = 1_704_067_200_000;

    fn series(days: i64) -> RawSeries {
        let prices = (0..days)
            .map(|d| RawPoint::new(T0 + d * DAY_MS + 3_600_000, 100.0 + d as f64))
            .collect();
        let volumes = (0..days).map(|d| RawPoint::new(T0 + d * DAY_MS, 5.0)).collect();
        RawSeries::new(prices, volumes)
    }

    #[test]
    fn test_build_table_daily_without_features() {
        let table = build_table(&series(10), Frequency::Daily, false);
        assert_eq!(table.len(), 10);
        assert!(table.columns.is_empty());
    }

    #[test]
    fn test_build_table_weekly_with_features() {
        let table = build_table(&series(21), Frequency::Weekly, true);

        assert_eq!(table.len(), 3);
        assert_eq!(table.columns, FeatureColumn::for_frequency(Frequency::Weekly));
        assert_eq!(table.rows[0].bar.volume, 35.0);
        assert_eq!(table.rows[1].weekly_return, table.rows[1].pct_change);
    }

    #[test]
    fn test_build_table_empty_series() {
        let table = build_table(&RawSeries::default(), Frequency::Daily, true);
        assert!(table.is_empty());
        assert!(!table.columns.is_empty());
    }

    #[cfg(feature = "fetch")]
    mod fetch {
        use super::*;
        use async_trait::async_trait;
        use marketmint_types::TimeRangeError;
        use std::sync::Mutex;

        #[derive(Debug, Default)]
        struct FakeFetcher {
            requested: Mutex<Vec<(String, String, TimeRange)>>,
        }

        #[async_trait]
        impl RawFetcher for FakeFetcher {
            async fn fetch_range(
                &self,
                asset: &AssetId,
                vs_currency: &str,
                range: TimeRange,
            ) -> Result<RawSeries, FetchError> {
                self.requested
                    .lock()
                    .unwrap()
                    .push((asset.to_string(), vs_currency.to_string(), range));
                Ok(series(28))
            }
        }

        #[tokio::test]
        async fn test_weekly_gold_features() {
            let fetcher = FakeFetcher::default();
            let table = weekly_gold_features(&fetcher, 28).await.unwrap();

            assert_eq!(table.len(), 4);
            assert!(table.columns.contains(&FeatureColumn::WeeklyReturn));

            let requested = fetcher.requested.lock().unwrap();
            assert_eq!(requested.len(), 1);
            assert_eq!(requested[0].0, "pax-gold");
            assert_eq!(requested[0].1, "usd");
            assert_eq!(requested[0].2.duration_seconds(), 28 * 86_400);
        }

        #[tokio::test]
        async fn test_oversized_lookback_is_an_error() {
            let fetcher = FakeFetcher::default();
            let result = weekly_gold_features(&fetcher, 100_000_000).await;

            assert!(matches!(
                result,
                Err(FetchError::TimeRange(TimeRangeError::LookbackOverflow(100_000_000)))
            ));
            assert!(fetcher.requested.lock().unwrap().is_empty());
        }
    }
}
