//! Raw points to UTC calendar-day bars.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use marketmint_types::{RawPoint, RawSeries, unix_ms_to_date};

use crate::BarTable;
use crate::builder::BarBuilder;

/// Resamples raw price and volume points into one bar per UTC calendar day.
///
/// Days without a price point are omitted, whatever their volume. Days with
/// prices but no volume points get a volume of zero. NaN values and
/// timestamps outside the representable date range are skipped.
#[must_use]
pub fn resample_daily(series: &RawSeries) -> BarTable {
    let mut days: BTreeMap<NaiveDate, BarBuilder> = BTreeMap::new();

    for point in usable(&series.prices) {
        let Some(day) = unix_ms_to_date(point.timestamp_ms) else {
            continue;
        };
        let (ts, price) = (point.timestamp_ms, point.value);
        days.entry(day)
            .and_modify(|b| b.update(ts, price, price, price, price))
            .or_insert_with(|| BarBuilder::new(ts, price, price, price, price));
    }

    for point in usable(&series.volumes) {
        if let Some(builder) = unix_ms_to_date(point.timestamp_ms).and_then(|d| days.get_mut(&d)) {
            builder.add_volume(point.value);
        }
    }

    days.into_iter()
        .map(|(day, builder)| builder.finish(day))
        .collect()
}

fn usable(points: &[RawPoint]) -> impl Iterator<Item = &RawPoint> {
    points.iter().filter(|p| !p.value.is_nan())
}
