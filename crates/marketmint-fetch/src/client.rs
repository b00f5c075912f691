//! HTTP client for the CoinGecko market-chart endpoints.

use std::path::PathBuf;
use std::time::Duration;

use marketmint_assets::AssetId;
use marketmint_types::{RawSeries, TimeRange, TimeRangeError};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::cache::ResponseCache;
use crate::parse::parse_market_chart;
use crate::url::{BASE_URL, ChartDays, market_chart_days_url, market_chart_range_url};

/// Configuration for the CoinGecko client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Backoff factor: retry `n` waits `backoff_factor * 2^(n-1)`.
    pub backoff_factor: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// User agent string.
    pub user_agent: String,
    /// API base URL.
    pub base_url: String,
    /// Response cache time-to-live. Zero disables the cache.
    pub cache_ttl: Duration,
    /// Response cache directory. `None` uses the platform cache directory.
    pub cache_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            max_retries: 5,
            backoff_factor: Duration::from_millis(1500),
            max_delay: Duration::from_secs(120),
            user_agent: format!("marketmint/{}", env!("CARGO_PKG_VERSION")),
            base_url: BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(3600),
            cache_dir: None,
        }
    }
}

/// Errors that can occur while fetching market data.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("Server returned {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Response body was not a market chart.
    #[error("Invalid market chart payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL could not be parsed or cannot carry a path.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// A fetch window could not be turned into a range.
    #[error(transparent)]
    TimeRange(#[from] TimeRangeError),
}

/// CoinGecko client with retry logic and an optional response cache.
///
/// Built once per run and passed by reference; requests are issued one at
/// a time by the caller.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    config: ClientConfig,
    cache: Option<ResponseCache>,
}

impl CoinGeckoClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;

        let cache = if config.cache_ttl.is_zero() {
            None
        } else {
            config
                .cache_dir
                .clone()
                .or_else(ResponseCache::default_dir)
                .map(|dir| ResponseCache::new(dir, config.cache_ttl))
        };
        match &cache {
            Some(cache) => tracing::debug!(dir = %cache.dir().display(), ttl = ?cache.ttl(), "response cache enabled"),
            None => tracing::debug!("response cache disabled"),
        }

        Ok(Self {
            client,
            config,
            cache,
        })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the response cache, if enabled.
    #[must_use]
    pub const fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// Fetches price and volume points for `asset` over `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries or the
    /// payload cannot be parsed.
    pub async fn market_chart_range(
        &self,
        asset: &AssetId,
        vs_currency: &str,
        range: TimeRange,
    ) -> Result<RawSeries, FetchError> {
        let url = market_chart_range_url(&self.config.base_url, asset.as_str(), vs_currency, range)?;
        let body = self.get_text(&url).await?;
        Ok(parse_market_chart(&body)?.with_range(range))
    }

    /// Fetches price and volume points for `asset` over the last `days` days.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries or the
    /// payload cannot be parsed.
    pub async fn market_chart_days(
        &self,
        asset: &AssetId,
        vs_currency: &str,
        days: ChartDays,
    ) -> Result<RawSeries, FetchError> {
        let url = market_chart_days_url(&self.config.base_url, asset.as_str(), vs_currency, days)?;
        let body = self.get_text(&url).await?;
        Ok(parse_market_chart(&body)?)
    }

    /// Performs a GET, serving from and storing into the cache.
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        if let Some(body) = self.cache.as_ref().and_then(|c| c.get(url)) {
            tracing::debug!(%url, "cache hit");
            return Ok(body);
        }

        let body = self.download(url).await?;
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(url, &body) {
                tracing::warn!(%url, "failed to store response in cache: {e}");
            }
        }
        Ok(body)
    }

    /// Downloads a response body, retrying transient failures.
    async fn download(&self, url: &str) -> Result<String, FetchError> {
        let mut attempts = 0;

        loop {
            tracing::debug!(%url, attempt = attempts + 1, "GET");
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.text().await?);
                    }

                    if is_retryable_status(status) && attempts < self.config.max_retries {
                        attempts += 1;
                        let delay = retry_after(&response)
                            .map_or_else(|| self.backoff_delay(attempts), |d| d.min(self.config.max_delay));
                        tracing::warn!(
                            %url,
                            status = status.as_u16(),
                            attempt = attempts,
                            "retrying in {delay:?}"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return Err(FetchError::Status {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) if is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.backoff_delay(attempts);
                    tracing::warn!(%url, attempt = attempts, "request failed ({e}), retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay: `backoff_factor * 2^(attempt-1)`, capped.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.config
            .backoff_factor
            .saturating_mul(1u32 << exponent)
            .min(self.config.max_delay)
    }
}

const fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

fn is_retryable_error(error: &reqwest::Error) -> bool {
    if error.is_builder() {
        return false;
    }
    error.is_timeout() || error.is_connect() || error.is_request()
}

/// Reads a `Retry-After` header given in seconds.
fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.backoff_factor, Duration::from_millis(1500));
        assert_eq!(config.base_url, BASE_URL);
        assert!(config.user_agent.starts_with("marketmint/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let config = ClientConfig {
            cache_ttl: Duration::ZERO,
            ..ClientConfig::default()
        };
        let client = CoinGeckoClient::new(config).unwrap();
        assert!(client.cache().is_none());
    }

    #[tokio::test]
    async fn test_client_explicit_cache_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            cache_dir: Some(dir.path().to_path_buf()),
            ..ClientConfig::default()
        };
        let client = CoinGeckoClient::new(config).unwrap();
        assert_eq!(client.cache().map(ResponseCache::dir), Some(dir.path()));
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let config = ClientConfig {
            cache_ttl: Duration::ZERO,
            max_delay: Duration::from_secs(10),
            ..ClientConfig::default()
        };
        let client = CoinGeckoClient::new(config).unwrap();

        assert_eq!(client.backoff_delay(1), Duration::from_millis(1500));
        assert_eq!(client.backoff_delay(2), Duration::from_millis(3000));
        assert_eq!(client.backoff_delay(3), Duration::from_millis(6000));
        assert_eq!(client.backoff_delay(4), Duration::from_secs(10));
        assert_eq!(client.backoff_delay(40), Duration::from_secs(10));
    }

    #[test]
    fn test_retryable_statuses() {
        for code in [429, 500, 502, 503, 504] {
            assert!(is_retryable_status(StatusCode::from_u16(code).unwrap()));
        }
        for code in [400, 401, 404, 501] {
            assert!(!is_retryable_status(StatusCode::from_u16(code).unwrap()));
        }
    }

    #[tokio::test]
    async fn test_cached_response_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            cache_dir: Some(dir.path().to_path_buf()),
            max_retries: 0,
            ..ClientConfig::default()
        };
        let client = CoinGeckoClient::new(config).unwrap();
        let asset = marketmint_assets::AssetRegistry::global().resolve("gold");
        let range = TimeRange::new(1_704_067_200, 1_704_153_600).unwrap();

        let url = market_chart_range_url(&client.config().base_url, asset.as_str(), "usd", range).unwrap();
        client
            .cache()
            .unwrap()
            .put(&url, r#"{"prices":[[1704067200000,2050.0]],"total_volumes":[]}"#)
            .unwrap();

        let series = client.market_chart_range(&asset, "usd", range).await.unwrap();
        assert_eq!(series.prices.len(), 1);
        assert_eq!(series.range, Some(range));
    }

    const CHART_BODY: &str = r#"{"prices":[[1704067200000,42000.5]],"total_volumes":[[1704067200000,10.0]]}"#;

    fn http_response(status: &str, headers: &[&str], body: &str) -> String {
        let mut response = format!("HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n", body.len());
        for header in headers {
            response.push_str(header);
            response.push_str("\r\n");
        }
        response.push_str("\r\n");
        response.push_str(body);
        response
    }

    /// Serves `responses` to successive connections and counts the requests.
    async fn serve(responses: Vec<String>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                counter.fetch_add(1, Ordering::SeqCst);
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        (base_url, hits)
    }

    fn local_client(base_url: String, backoff_factor: Duration) -> CoinGeckoClient {
        CoinGeckoClient::new(ClientConfig {
            base_url,
            backoff_factor,
            max_delay: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::ZERO,
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_retries_unavailable_then_succeeds() {
        let (base_url, hits) = serve(vec![
            http_response("503 Service Unavailable", &["Retry-After: 1"], ""),
            http_response("200 OK", &["Content-Type: application/json"], CHART_BODY),
        ])
        .await;
        // Backoff alone would wait 10s; Retry-After asks for 1s.
        let client = local_client(base_url, Duration::from_secs(10));
        let asset = marketmint_assets::AssetRegistry::global().resolve("bitcoin");
        let range = TimeRange::new(1_704_067_200, 1_704_153_600).unwrap();

        let started = std::time::Instant::now();
        let series = client.market_chart_range(&asset, "usd", range).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(series.prices.len(), 1);
        assert_relative_eq!(series.prices[0].value, 42000.5);
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_secs(8));
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let (base_url, hits) = serve(vec![
            http_response("404 Not Found", &[], r#"{"error":"coin not found"}"#),
            http_response("200 OK", &[], CHART_BODY),
        ])
        .await;
        let client = local_client(base_url, Duration::from_millis(10));
        let asset = marketmint_assets::AssetRegistry::global().resolve("delisted");

        let result = client.market_chart_days(&asset, "usd", ChartDays::Count(7)).await;

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
