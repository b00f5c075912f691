//! JSON output format.

use marketmint_features::{FeatureRow, FeatureTable};
use serde_json::{Map, Value};
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
///
/// Each row is an object keyed by column header; undefined features are
/// `null`.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }
}

fn row_object(table: &FeatureTable, row: &FeatureRow) -> Value {
    let bar = &row.bar;
    let mut obj = Map::new();
    obj.insert("date".into(), Value::String(bar.date.format("%Y-%m-%d").to_string()));
    obj.insert("open".into(), bar.open.into());
    obj.insert("high".into(), bar.high.into());
    obj.insert("low".into(), bar.low.into());
    obj.insert("close".into(), bar.close.into());
    obj.insert("volume".into(), bar.volume.into());

    for column in &table.columns {
        let value = match column.value(row) {
            Some(v) if column.is_flag() => Value::from(v as u8),
            Some(v) => Value::from(v),
            None => Value::Null,
        };
        obj.insert(column.name().into(), value);
    }
    Value::Object(obj)
}

impl Formatter for JsonFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &FeatureTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let rows = table.rows.iter().map(|row| row_object(table, row));

        match self.style {
            JsonStyle::Array => {
                let array = Value::Array(rows.collect());
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &array)?;
                } else {
                    serde_json::to_writer(&mut writer, &array)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for obj in rows {
                    serde_json::to_writer(&mut writer, &obj)?;
                    writeln!(writer)?;
                }
            }
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
