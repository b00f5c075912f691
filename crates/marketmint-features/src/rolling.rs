//! Positional rolling computations over close prices.

/// Period-over-period fractional change; `None` at position 0.
#[must_use]
pub fn pct_change(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(closes.windows(2).map(|w| Some((w[1] - w[0]) / w[0])));
    out
}

/// Simple moving average over the trailing `window` values.
///
/// Position `i` is `None` until `i + 1 >= window`. A zero window yields all
/// `None`.
#[must_use]
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| trailing_mean(values, i, window))
        .collect()
}

/// Mean of `values[i + 1 - window..=i]`, or `None` during warm-up.
pub(crate) fn trailing_mean(values: &[f64], i: usize, window: usize) -> Option<f64> {
    if window == 0 || i + 1 < window {
        return None;
    }
    let slice = &values[i + 1 - window..=i];
    Some(slice.iter().sum::<f64>() / window as f64)
}
