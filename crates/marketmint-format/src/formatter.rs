//! Output format abstraction.

use marketmint_features::FeatureTable;
use std::io::Write;
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// Apache Parquet format.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Tsv, Self::Json, Self::Ndjson, Self::Parquet]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Format known but not compiled in.
    #[error("Format {0} is not enabled in this build")]
    Unsupported(OutputFormat),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),

    /// A read-back table did not have the expected shape.
    #[error("Invalid table at line {line}: {message}")]
    InvalidTable {
        /// 1-based line number, header is line 1.
        line: u64,
        /// What was wrong.
        message: String,
    },
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes a feature table to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write + Send>(&self, table: &FeatureTable, writer: W) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

/// Writes `table` in `format` with that format's default settings.
///
/// # Errors
///
/// Returns an error if writing fails, or [`FormatError::Unsupported`] for
/// Parquet when the `parquet` feature is disabled.
pub fn write_table<W: Write + Send>(
    format: OutputFormat,
    table: &FeatureTable,
    writer: W,
) -> Result<(), FormatError> {
    use crate::{CsvFormatter, JsonFormatter};

    match format {
        OutputFormat::Csv => CsvFormatter::new().write_table(table, writer),
        OutputFormat::Tsv => CsvFormatter::tsv().write_table(table, writer),
        OutputFormat::Json => JsonFormatter::new().write_table(table, writer),
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_table(table, writer),
        #[cfg(feature = "parquet")]
        OutputFormat::Parquet => crate::ParquetFormatter::new().write_table(table, writer),
        #[cfg(not(feature = "parquet"))]
        OutputFormat::Parquet => {
            drop(writer);
            Err(FormatError::Unsupported(format))
        }
    }
}
