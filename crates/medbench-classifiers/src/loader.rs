//! Dataset loader: reads a dataset's source files, applies its structural
//! fixes and coerces cells to numbers.
use std::path::Path;

use anyhow::{Context, Result};

use crate::data_handling::{Dataset, Table};
use crate::datasets::DatasetId;
use crate::error::EvalError;
use crate::io::{read_table_with_config, TableReaderConfig};

/// Load one dataset from `data_dir`.
///
/// Multiple source files are concatenated in profile order. A missing or
/// unreadable file aborts the load.
pub fn load<P: AsRef<Path>>(id: DatasetId, data_dir: P) -> Result<Dataset> {
    let profile = id.profile();
    let mut table: Option<Table> = None;

    for source in profile.sources {
        let path = data_dir.as_ref().join(source.path);
        let config = TableReaderConfig {
            has_headers: source.has_headers,
        };
        let part = read_table_with_config(&path, &config)
            .with_context(|| format!("Failed to load dataset '{}'", id))?;
        table = Some(match table {
            None => part,
            Some(acc) => acc
                .concat(part)
                .with_context(|| format!("Cannot concatenate {} onto '{}'", path.display(), id))?,
        });
    }

    let table = table.ok_or_else(|| EvalError::EmptyDataset(id.to_string()))?;
    let mut table = (profile.restructure)(table)
        .with_context(|| format!("Failed to restructure dataset '{}'", id))?;
    table.coerce_numeric();

    if table.nrows() == 0 {
        return Err(EvalError::EmptyDataset(id.to_string()).into());
    }
    let label_idx = profile.label_column.resolve(table.ncols());
    if table.ncols() < 2 || label_idx >= table.ncols() {
        return Err(EvalError::ColumnCount {
            expected: label_idx.max(1) + 1,
            found: table.ncols(),
        })
        .with_context(|| format!("Dataset '{}' has too few columns", id));
    }

    let dataset = Dataset::new(id, table);
    dataset.log_input_data_summary();
    Ok(dataset)
}
