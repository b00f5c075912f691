//! Destination paths for multi-asset runs.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Placeholder substituted with the ticker in path templates.
pub const TICKER_PLACEHOLDER: &str = "{ticker}";

/// Extension used when the base path has none.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Resolves where one ticker's table is written.
///
/// - single asset: `base` unchanged
/// - `base` contains `{ticker}`: every occurrence substituted
/// - `base` ends with a separator or is an existing directory: `base/ticker.csv`
/// - otherwise: `root_ticker.ext`, with `.csv` when `base` has no extension
///
/// # Example
///
/// ```
/// use marketmint_format::resolve_output_path;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     resolve_output_path("data/ohlcv.csv", "bitcoin", true),
///     PathBuf::from("data/ohlcv_bitcoin.csv")
/// );
/// assert_eq!(
///     resolve_output_path("data/{ticker}_daily.csv", "pax-gold", true),
///     PathBuf::from("data/pax-gold_daily.csv")
/// );
/// ```
#[must_use]
pub fn resolve_output_path(base: &str, ticker: &str, is_multi: bool) -> PathBuf {
    resolve_output_path_with_extension(base, ticker, is_multi, DEFAULT_EXTENSION)
}

/// Same as [`resolve_output_path`], supplying `extension` instead of `csv`
/// where the base path does not name one.
#[must_use]
pub fn resolve_output_path_with_extension(
    base: &str,
    ticker: &str,
    is_multi: bool,
    extension: &str,
) -> PathBuf {
    if !is_multi {
        return PathBuf::from(base);
    }
    if base.contains(TICKER_PLACEHOLDER) {
        return PathBuf::from(base.replace(TICKER_PLACEHOLDER, ticker));
    }
    if ends_with_separator(base) || Path::new(base).is_dir() {
        return Path::new(base).join(format!("{ticker}.{extension}"));
    }

    let (root, ext) = split_extension(base);
    PathBuf::from(format!("{root}_{ticker}.{}", ext.unwrap_or(extension)))
}

fn ends_with_separator(path: &str) -> bool {
    path.ends_with('/') || path.ends_with(MAIN_SEPARATOR)
}

/// Splits `base` at the extension dot of its last component.
///
/// Leading dots (hidden files) are not extensions.
fn split_extension(base: &str) -> (&str, Option<&str>) {
    let name_start = base.rfind(['/', MAIN_SEPARATOR]).map_or(0, |i| i + 1);
    let name = &base[name_start..];
    match name.rfind('.') {
        Some(dot) if name[..dot].trim_start_matches('.').is_empty() => (base, None),
        Some(dot) => {
            let split = name_start + dot;
            (&base[..split], Some(&base[split + 1..]))
        }
        None => (base, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_asset_unchanged() {
        assert_eq!(
            resolve_output_path("data/{ticker}.csv", "bitcoin", false),
            PathBuf::from("data/{ticker}.csv")
        );
    }

    #[test]
    fn test_template_substitution() {
        assert_eq!(
            resolve_output_path("out/{ticker}/{ticker}.csv", "eth", true),
            PathBuf::from("out/eth/eth.csv")
        );
    }

    #[test]
    fn test_suffix_before_extension() {
        assert_eq!(
            resolve_output_path("data/ohlcv.csv", "bitcoin", true),
            PathBuf::from("data/ohlcv_bitcoin.csv")
        );
        assert_eq!(
            resolve_output_path("data/ohlcv.parquet", "bitcoin", true),
            PathBuf::from("data/ohlcv_bitcoin.parquet")
        );
        assert_eq!(
            resolve_output_path("data/ohlcv", "bitcoin", true),
            PathBuf::from("data/ohlcv_bitcoin.csv")
        );
        assert_eq!(
            resolve_output_path("v1.2/ohlcv", "bitcoin", true),
            PathBuf::from("v1.2/ohlcv_bitcoin.csv")
        );
        assert_eq!(
            resolve_output_path(".ohlcv", "bitcoin", true),
            PathBuf::from(".ohlcv_bitcoin.csv")
        );
    }

    #[test]
    fn test_trailing_separator_is_directory() {
        assert_eq!(
            resolve_output_path("exports/", "bitcoin", true),
            PathBuf::from("exports/bitcoin.csv")
        );
    }

    #[test]
    fn test_supplied_extension() {
        assert_eq!(
            resolve_output_path_with_extension("exports/", "bitcoin", true, "parquet"),
            PathBuf::from("exports/bitcoin.parquet")
        );
        assert_eq!(
            resolve_output_path_with_extension("data/ohlcv", "eth", true, "ndjson"),
            PathBuf::from("data/ohlcv_eth.ndjson")
        );
        assert_eq!(
            resolve_output_path_with_extension("data/ohlcv.csv", "eth", true, "ndjson"),
            PathBuf::from("data/ohlcv_eth.csv")
        );
    }

    #[test]
    fn test_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();

        assert_eq!(
            resolve_output_path(base, "pax-gold", true),
            dir.path().join("pax-gold.csv")
        );
    }
}
