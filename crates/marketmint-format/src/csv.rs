//! CSV output format and read-back.

use chrono::NaiveDate;
use marketmint_aggregate::Bar;
use marketmint_features::{BAR_COLUMNS, FeatureColumn, FeatureRow, FeatureTable};
use std::io::{Read, Write};

use crate::{FormatError, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV formatter.
///
/// Undefined feature values are written as empty fields.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: u8,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            include_header: true,
        }
    }

    /// Reads a table written with this formatter's delimiter and a header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is not a known table header or a field
    /// fails to parse.
    pub fn read_table<R: Read>(&self, reader: R) -> Result<FeatureTable, FormatError> {
        let mut rdr = ::csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = parse_header(&headers)?;

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let line = i as u64 + 2;
            rows.push(parse_record(&record, &columns, line)?);
        }

        Ok(FeatureTable { rows, columns })
    }
}

/// Reads a comma-separated table with a header row.
///
/// # Errors
///
/// See [`CsvFormatter::read_table`].
pub fn read_csv_table<R: Read>(reader: R) -> Result<FeatureTable, FormatError> {
    CsvFormatter::new().read_table(reader)
}

impl Formatter for CsvFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &FeatureTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let mut wtr = ::csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        if self.include_header {
            wtr.write_record(table.header())?;
        }

        let mut record = Vec::with_capacity(BAR_COLUMNS.len() + table.columns.len());
        for row in &table.rows {
            record.clear();
            let bar = &row.bar;
            record.push(bar.date.format(DATE_FORMAT).to_string());
            record.extend(
                [bar.open, bar.high, bar.low, bar.close, bar.volume]
                    .iter()
                    .map(f64::to_string),
            );
            record.extend(table.columns.iter().map(|c| feature_field(*c, row)));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == b'\t' { "tsv" } else { "csv" }
    }
}

fn feature_field(column: FeatureColumn, row: &FeatureRow) -> String {
    match column.value(row) {
        Some(v) if column.is_flag() => format!("{}", v as u8),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

fn parse_header(headers: &::csv::StringRecord) -> Result<Vec<FeatureColumn>, FormatError> {
    let invalid = |message: String| FormatError::InvalidTable { line: 1, message };

    let names: Vec<&str> = headers.iter().collect();
    if names.len() < BAR_COLUMNS.len() || names[..BAR_COLUMNS.len()] != *BAR_COLUMNS {
        return Err(invalid(format!(
            "expected header to start with {}",
            BAR_COLUMNS.join(",")
        )));
    }

    names[BAR_COLUMNS.len()..]
        .iter()
        .map(|name| {
            FeatureColumn::from_name(name).ok_or_else(|| invalid(format!("unknown column '{name}'")))
        })
        .collect()
}

fn parse_record(
    record: &::csv::StringRecord,
    columns: &[FeatureColumn],
    line: u64,
) -> Result<FeatureRow, FormatError> {
    let invalid = |message: String| FormatError::InvalidTable { line, message };

    let field = |i: usize| record.get(i).unwrap_or("");
    let number = |i: usize| -> Result<f64, FormatError> {
        field(i)
            .parse()
            .map_err(|_| invalid(format!("'{}' is not a number", field(i))))
    };

    let date = NaiveDate::parse_from_str(field(0), DATE_FORMAT)
        .map_err(|_| invalid(format!("'{}' is not a YYYY-MM-DD date", field(0))))?;
    let bar = Bar::new(date, number(1)?, number(2)?, number(3)?, number(4)?, number(5)?);

    let mut row = FeatureRow::from(bar);
    for (offset, column) in columns.iter().enumerate() {
        let i = BAR_COLUMNS.len() + offset;
        let value = if field(i).is_empty() { None } else { Some(number(i)?) };
        column.set(&mut row, value);
    }
    Ok(row)
}
