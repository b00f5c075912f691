//! CoinGecko URL construction.

use marketmint_types::TimeRange;
use reqwest::Url;

use crate::client::FetchError;

/// Base URL for the CoinGecko public API.
pub const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Lookback accepted by the `market_chart` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartDays {
    /// A number of days back from now.
    Count(u32),
    /// All available history.
    Max,
}

impl std::fmt::Display for ChartDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(days) => write!(f, "{days}"),
            Self::Max => f.write_str("max"),
        }
    }
}

impl std::str::FromStr for ChartDays {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            Ok(Self::Max)
        } else {
            s.parse().map(Self::Count)
        }
    }
}

/// Builds the URL for a market chart over an explicit range.
///
/// URL format: `{base}/coins/{id}/market_chart/range?vs_currency={vs}&from={from}&to={to}`
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if `base` is not an absolute URL.
///
/// # Example
///
/// ```
/// use marketmint_fetch::url::{BASE_URL, market_chart_range_url};
/// use marketmint_types::TimeRange;
///
/// let range = TimeRange::new(1_704_067_200, 1_704_153_600).unwrap();
/// let url = market_chart_range_url(BASE_URL, "pax-gold", "usd", range).unwrap();
/// assert_eq!(
///     url,
///     "https://api.coingecko.com/api/v3/coins/pax-gold/market_chart/range?vs_currency=usd&from=1704067200&to=1704153600"
/// );
/// ```
pub fn market_chart_range_url(
    base: &str,
    coin_id: &str,
    vs_currency: &str,
    range: TimeRange,
) -> Result<String, FetchError> {
    let mut url = endpoint(base, coin_id, &["market_chart", "range"])?;
    url.query_pairs_mut()
        .append_pair("vs_currency", &vs_currency.to_lowercase())
        .append_pair("from", &range.from_ts.to_string())
        .append_pair("to", &range.to_ts.to_string());
    Ok(url.into())
}

/// Builds the URL for a market chart over the last `days` days.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if `base` is not an absolute URL.
pub fn market_chart_days_url(
    base: &str,
    coin_id: &str,
    vs_currency: &str,
    days: ChartDays,
) -> Result<String, FetchError> {
    let mut url = endpoint(base, coin_id, &["market_chart"])?;
    url.query_pairs_mut()
        .append_pair("vs_currency", &vs_currency.to_lowercase())
        .append_pair("days", &days.to_string());
    Ok(url.into())
}

/// `{base}/coins/{coin_id}/{tail..}` with every segment percent-encoded.
fn endpoint(base: &str, coin_id: &str, tail: &[&str]) -> Result<Url, FetchError> {
    let mut url = Url::parse(base.trim_end_matches('/'))
        .map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| FetchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push("coins")
        .push(coin_id)
        .extend(tail);
    Ok(url)
}
