//! Output formatters for marketmint feature tables.
//!
//! - [`CsvFormatter`] - CSV/TSV with empty fields for undefined values
//! - [`JsonFormatter`] - JSON array or NDJSON with `null` for undefined values
//! - [`ParquetFormatter`] - Apache Parquet columnar format
//! - [`read_csv_table`] - Parses a written CSV table back into rows
//! - [`resolve_output_path`] - Per-ticker destination paths

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marketmint/marketmint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod path;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::{CsvFormatter, read_csv_table};
pub use formatter::{FormatError, Formatter, OutputFormat, write_table};
pub use json::{JsonFormatter, JsonStyle};
pub use path::{
    DEFAULT_EXTENSION, TICKER_PLACEHOLDER, resolve_output_path, resolve_output_path_with_extension,
};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
