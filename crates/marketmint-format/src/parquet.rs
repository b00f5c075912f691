//! Apache Parquet output format.

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::Datelike;
use marketmint_features::{FeatureColumn, FeatureRow, FeatureTable};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parquet formatter.
///
/// `date` is Date32, prices and volume are non-null Float64, features are
/// nullable Float64 and crossover flags are Int32.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for a table with the given derived columns.
    fn schema(columns: &[FeatureColumn]) -> Schema {
        let mut fields = vec![
            Field::new("date", DataType::Date32, false),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::Float64, false),
        ];
        fields.extend(columns.iter().map(|c| {
            if c.is_flag() {
                Field::new(c.name(), DataType::Int32, false)
            } else {
                Field::new(c.name(), DataType::Float64, true)
            }
        }));
        Schema::new(fields)
    }

    /// Converts rows to an Arrow RecordBatch.
    fn to_batch(
        schema: &Arc<Schema>,
        columns: &[FeatureColumn],
        rows: &[FeatureRow],
    ) -> Result<RecordBatch, FormatError> {
        let dates: Vec<i32> = rows
            .iter()
            .map(|r| r.bar.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            .collect();
        let bar_field = |f: fn(&FeatureRow) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
        };

        let mut arrays: Vec<ArrayRef> = vec![
            Arc::new(Date32Array::from(dates)),
            bar_field(|r| r.bar.open),
            bar_field(|r| r.bar.high),
            bar_field(|r| r.bar.low),
            bar_field(|r| r.bar.close),
            bar_field(|r| r.bar.volume),
        ];
        for column in columns {
            let array: ArrayRef = if column.is_flag() {
                Arc::new(Int32Array::from(
                    rows.iter()
                        .map(|r| column.value(r).map_or(0, |v| v as i32))
                        .collect::<Vec<_>>(),
                ))
            } else {
                Arc::new(Float64Array::from(
                    rows.iter().map(|r| column.value(r)).collect::<Vec<_>>(),
                ))
            };
            arrays.push(array);
        }

        RecordBatch::try_new(Arc::clone(schema), arrays)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &FeatureTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::schema(&table.columns));
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in table.rows.chunks(self.row_group_size.max(1)) {
            let batch = Self::to_batch(&schema, &table.columns, chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
