//! Delimited text reader producing raw (uncoerced) tables.
use std::path::Path;

use anyhow::{Context, Result};

use crate::data_handling::{Table, Value};

/// Configuration for reading one comma-separated source file.
#[derive(Debug, Clone, Default)]
pub struct TableReaderConfig {
    /// When false, columns are named by position (`"0"`, `"1"`, ...).
    pub has_headers: bool,
}

/// Read a headerless comma-separated file.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    read_table_with_config(path, &TableReaderConfig::default())
}

/// Read a delimited file into a table of text cells.
///
/// Cells are trimmed but otherwise left as text; numeric coercion happens
/// after the dataset-specific fixes so that label rewriting sees the raw
/// strings.
pub fn read_table_with_config<P: AsRef<Path>>(path: P, config: &TableReaderConfig) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .trim(csv::Trim::All)
        .from_path(&path)
        .with_context(|| format!("Failed to open data file: {}", path.as_ref().display()))?;

    let mut columns = if config.has_headers {
        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header row: {}", path.as_ref().display()))?;
        Some(headers.iter().map(|h| h.to_string()).collect::<Vec<_>>())
    } else {
        None
    };

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| {
            format!("Failed to read row {} of {}", row_idx + 1, path.as_ref().display())
        })?;
        if columns.is_none() {
            columns = Some(Table::positional_columns(record.len()));
        }
        rows.push(
            record
                .iter()
                .map(|cell| Value::Text(cell.to_string()))
                .collect::<Vec<_>>(),
        );
    }

    let table = Table::new(columns.unwrap_or_default(), rows)
        .with_context(|| format!("Inconsistent row width in {}", path.as_ref().display()))?;

    log::debug!(
        "Read {} rows x {} columns from {}",
        table.nrows(),
        table.ncols(),
        path.as_ref().display()
    );

    Ok(table)
}
