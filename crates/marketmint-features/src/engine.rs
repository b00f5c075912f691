//! Feature table assembly.

use marketmint_aggregate::Bar;
use marketmint_types::Frequency;

use crate::row::{FeatureColumn, FeatureRow, FeatureTable};
use crate::{crossovers, pct_change, rsi, sma};

/// Window of the fast moving average.
pub const FAST_SMA_PERIOD: usize = 4;
/// Window of the slow moving average.
pub const SLOW_SMA_PERIOD: usize = 12;
/// Window of the RSI averages.
pub const RSI_PERIOD: usize = 14;

/// Computes every derived column for an ordered bar table.
///
/// Returns exactly one row per bar, in input order. `weekly_return` is only
/// populated (and only listed as a column) when `frequency` is weekly.
#[must_use]
pub fn compute_features(bars: &[Bar], frequency: Frequency) -> FeatureTable {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let changes = pct_change(&closes);
    let fast = sma(&closes, FAST_SMA_PERIOD);
    let slow = sma(&closes, SLOW_SMA_PERIOD);
    let rsi_values = rsi(&closes, RSI_PERIOD);
    let flags = crossovers(&fast, &slow);

    let rows = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| FeatureRow {
            bar: *bar,
            pct_change: changes[i],
            weekly_return: if frequency.is_weekly() { changes[i] } else { None },
            sma_4: fast[i],
            sma_12: slow[i],
            rsi_14: rsi_values[i],
            sma_cross_up: flags[i].up,
            sma_cross_down: flags[i].down,
        })
        .collect();

    FeatureTable {
        rows,
        columns: FeatureColumn::for_frequency(frequency),
    }
}
