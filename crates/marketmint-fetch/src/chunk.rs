//! Windowed fetching of long ranges.

use std::time::Duration;

use async_trait::async_trait;
use marketmint_assets::AssetId;
use marketmint_types::{RawSeries, TimeRange};

use crate::client::{CoinGeckoClient, FetchError};

/// Fetches a raw series for one asset over one range.
#[async_trait]
pub trait RawFetcher: Send + Sync {
    /// Fetches price and volume points for `asset` over `range`.
    async fn fetch_range(
        &self,
        asset: &AssetId,
        vs_currency: &str,
        range: TimeRange,
    ) -> Result<RawSeries, FetchError>;
}

#[async_trait]
impl RawFetcher for CoinGeckoClient {
    async fn fetch_range(
        &self,
        asset: &AssetId,
        vs_currency: &str,
        range: TimeRange,
    ) -> Result<RawSeries, FetchError> {
        self.market_chart_range(asset, vs_currency, range).await
    }
}

/// Fetches `range` as contiguous windows of at most `chunk_days` days and
/// concatenates the points in window order.
///
/// Sleeps `delay` between windows, never after the last one. An empty range
/// issues no request and returns an empty series.
///
/// # Errors
///
/// Returns the first window's error; earlier windows' points are discarded.
pub async fn fetch_chunked<F: RawFetcher + ?Sized>(
    fetcher: &F,
    asset: &AssetId,
    vs_currency: &str,
    range: TimeRange,
    chunk_days: i64,
    delay: Duration,
) -> Result<RawSeries, FetchError> {
    let windows = range.windows(chunk_days);
    let total = windows.len();
    let mut merged = RawSeries::empty(range);

    for (i, window) in windows.enumerate() {
        tracing::info!(asset = %asset, window = i + 1, total, "fetching {}..{}", window.start, window.end);
        let part = fetcher
            .fetch_range(asset, vs_currency, TimeRange::new(window.start, window.end)?)
            .await?;
        tracing::debug!(prices = part.prices.len(), volumes = part.volumes.len(), "window fetched");
        merged.extend(part);

        if i + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    Ok(merged)
}

/// Fetches `range` chunked when `chunk_days` is set and the span exceeds
/// one window, as a single request otherwise.
///
/// # Errors
///
/// Returns an error if any request fails.
pub async fn fetch_span<F: RawFetcher + ?Sized>(
    fetcher: &F,
    asset: &AssetId,
    vs_currency: &str,
    range: TimeRange,
    chunk_days: Option<i64>,
    delay: Duration,
) -> Result<RawSeries, FetchError> {
    match chunk_days {
        Some(days) if range.exceeds_days(days) => {
            fetch_chunked(fetcher, asset, vs_currency, range, days, delay).await
        }
        _ => {
            tracing::debug!(asset = %asset, %range, "single request");
            Ok(fetcher
                .fetch_range(asset, vs_currency, range)
                .await?
                .with_range(range))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketmint_assets::AssetRegistry;
    use marketmint_types::{RawPoint, SECONDS_PER_DAY};
    use std::sync::Mutex;

    /// Records requested ranges and returns one point at each range start.
    #[derive(Debug, Default)]
    struct RecordingFetcher {
        calls: Mutex<Vec<TimeRange>>,
        fail_on: Option<usize>,
    }

    impl RecordingFetcher {
        fn calls(&self) -> Vec<TimeRange> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RawFetcher for RecordingFetcher {
        async fn fetch_range(
            &self,
            _asset: &AssetId,
            _vs_currency: &str,
            range: TimeRange,
        ) -> Result<RawSeries, FetchError> {
            let mut calls = self.calls.lock().unwrap();
            if self.fail_on == Some(calls.len()) {
                return Err(FetchError::Status {
                    status: 503,
                    url: "fake".to_string(),
                });
            }
            calls.push(range);
            let point = RawPoint::new(range.from_ts * 1000, calls.len() as f64);
            Ok(RawSeries::new(vec![point], vec![point]))
        }
    }

    fn asset() -> AssetId {
        AssetRegistry::global().resolve("bitcoin")
    }

    #[tokio::test]
    async fn test_chunked_windows_are_contiguous() {
        let fetcher = RecordingFetcher::default();
        let range = TimeRange::new(0, 10 * SECONDS_PER_DAY + 5).unwrap();

        let series = fetch_chunked(&fetcher, &asset(), "usd", range, 4, Duration::ZERO)
            .await
            .unwrap();

        let calls = fetcher.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].from_ts, 0);
        assert_eq!(calls.last().unwrap().to_ts, range.to_ts);
        for pair in calls.windows(2) {
            assert_eq!(pair[0].to_ts, pair[1].from_ts);
            assert!(pair[0].duration_seconds() <= 4 * SECONDS_PER_DAY);
        }

        let values: Vec<f64> = series.prices.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.volumes.len(), 3);
        assert_eq!(series.range, Some(range));
    }

    #[tokio::test]
    async fn test_zero_chunk_days_is_one_day() {
        let fetcher = RecordingFetcher::default();
        let range = TimeRange::new(0, 3 * SECONDS_PER_DAY).unwrap();

        fetch_chunked(&fetcher, &asset(), "usd", range, 0, Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(fetcher.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_range_makes_no_request() {
        let fetcher = RecordingFetcher::default();
        let range = TimeRange::new(100, 100).unwrap();

        let series = fetch_chunked(&fetcher, &asset(), "usd", range, 1, Duration::ZERO)
            .await
            .unwrap();
        assert!(fetcher.calls().is_empty());
        assert!(series.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_windows_only() {
        let fetcher = RecordingFetcher::default();
        let range = TimeRange::new(0, 3 * SECONDS_PER_DAY).unwrap();
        let started = tokio::time::Instant::now();

        fetch_chunked(&fetcher, &asset(), "usd", range, 1, Duration::from_secs(1))
            .await
            .unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_window_error_is_terminal() {
        let fetcher = RecordingFetcher {
            fail_on: Some(1),
            ..RecordingFetcher::default()
        };
        let range = TimeRange::new(0, 3 * SECONDS_PER_DAY).unwrap();

        let result = fetch_chunked(&fetcher, &asset(), "usd", range, 1, Duration::ZERO).await;
        assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_span_single_request_when_short() {
        let fetcher = RecordingFetcher::default();
        let range = TimeRange::new(0, 2 * SECONDS_PER_DAY).unwrap();

        fetch_span(&fetcher, &asset(), "usd", range, Some(5), Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(fetcher.calls(), vec![range]);

        let fetcher = RecordingFetcher::default();
        fetch_span(&fetcher, &asset(), "usd", range, None, Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_span_chunks_when_long() {
        let fetcher = RecordingFetcher::default();
        let range = TimeRange::new(0, 6 * SECONDS_PER_DAY).unwrap();

        fetch_span(&fetcher, &asset(), "usd", range, Some(2), Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(fetcher.calls().len(), 3);
    }
}
