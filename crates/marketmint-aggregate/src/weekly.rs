//! Daily bars to weeks ending Sunday.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::builder::BarBuilder;
use crate::{Bar, BarTable};

/// Returns the Sunday that closes the Monday..Sunday week containing `date`.
#[must_use]
pub fn week_ending_sunday(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = (7 - date.weekday().number_from_monday()) % 7;
    date + TimeDelta::days(i64::from(days_to_sunday))
}

/// Groups daily bars into weeks ending Sunday (UTC).
///
/// Each weekly bar is labelled with its closing Sunday. Open and close come
/// from the chronologically first and last days present, so the result does
/// not depend on input order. Weeks with no daily bars are omitted.
#[must_use]
pub fn reaggregate_weekly(daily: &[Bar]) -> BarTable {
    let mut weeks: BTreeMap<NaiveDate, BarBuilder> = BTreeMap::new();

    for bar in daily {
        let key = i64::from(bar.date.num_days_from_ce());
        let builder = weeks
            .entry(week_ending_sunday(bar.date))
            .and_modify(|b| b.update(key, bar.open, bar.high, bar.low, bar.close))
            .or_insert_with(|| BarBuilder::new(key, bar.open, bar.high, bar.low, bar.close));
        builder.add_volume(bar.volume);
    }

    weeks
        .into_iter()
        .map(|(sunday, builder)| builder.finish(sunday))
        .collect()
}
