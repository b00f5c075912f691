//! Output formats and table rendering for the marketmint CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use marketmint_lib::{FeatureTable, OutputFormat, write_table};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format for saved tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
    Parquet,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Tsv => Self::Tsv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Parquet => Self::Parquet,
        }
    }
}

/// Writes a table to `output`, creating its parent directory.
pub(crate) fn write_table_file(table: &FeatureTable, output: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    write_table(format, table, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

/// Renders the first `limit` rows as an aligned text table.
pub(crate) fn preview(table: &FeatureTable, limit: usize) -> String {
    let header = table.header();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .take(limit)
        .map(|row| {
            let bar = &row.bar;
            let mut cells = vec![
                bar.date.to_string(),
                format!("{:.4}", bar.open),
                format!("{:.4}", bar.high),
                format!("{:.4}", bar.low),
                format!("{:.4}", bar.close),
                format!("{:.2}", bar.volume),
            ];
            cells.extend(table.columns.iter().map(|c| match c.value(row) {
                Some(v) if c.is_flag() => format!("{v:.0}"),
                Some(v) => format!("{v:.4}"),
                None => "NaN".to_string(),
            }));
            cells
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| rows.iter().map(|r| r[i].len()).fold(h.len(), usize::max))
        .collect();

    let mut out = String::new();
    push_line(&mut out, header.iter().copied(), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out.trim_end().to_string()
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect();
    out.push_str(&padded.join(" "));
    out.push('\n');
}
