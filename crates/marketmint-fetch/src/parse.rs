//! Market-chart payload parsing.

use marketmint_types::{RawPoint, RawSeries};
use serde::Deserialize;

/// `[timestamp_ms, value]` as sent by the API. Timestamps can arrive as
/// floats and values can be null.
type WirePoint = (f64, Option<f64>);

#[derive(Debug, Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Vec<WirePoint>,
    #[serde(default)]
    total_volumes: Vec<WirePoint>,
}

/// Parses a market-chart response body into a raw series.
///
/// Missing `prices` or `total_volumes` keys are empty sequences. Points
/// with a null value are dropped. `market_caps` is ignored.
///
/// # Errors
///
/// Returns an error if the body is not a JSON object of point arrays.
pub fn parse_market_chart(body: &str) -> Result<RawSeries, serde_json::Error> {
    let chart: MarketChart = serde_json::from_str(body)?;
    Ok(RawSeries::new(
        to_points(chart.prices),
        to_points(chart.total_volumes),
    ))
}

fn to_points(wire: Vec<WirePoint>) -> Vec<RawPoint> {
    wire.into_iter()
        .filter_map(|(ts, value)| value.map(|v| RawPoint::new(ts.round() as i64, v)))
        .collect()
}
