//! Relative Strength Index over simple-mean gains and losses.
//!
//! `avg_gain` and `avg_loss` are plain means of the trailing `period`
//! close-to-close changes (not Wilder smoothing), and the loss average is
//! offset by [`RSI_EPSILON`] so a loss-free window yields a value just under
//! 100 instead of a division by zero.

use crate::rolling::trailing_mean;

/// Offset added to the average loss.
pub const RSI_EPSILON: f64 = 1e-12;

/// Computes RSI over `closes`.
///
/// Changes start at position 1, so position `i` is defined once
/// `i >= period`.
#[must_use]
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if closes.is_empty() {
        return Vec::new();
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let mut out = Vec::with_capacity(closes.len());
    out.push(None);
    for j in 0..deltas.len() {
        let value = trailing_mean(&gains, j, period)
            .zip(trailing_mean(&losses, j, period))
            .map(|(avg_gain, avg_loss)| {
                let rs = avg_gain / (avg_loss + RSI_EPSILON);
                100.0 - 100.0 / (1.0 + rs)
            });
        out.push(value);
    }
    out
}
