//! Feature/label extraction: turns a loaded dataset into a numeric feature
//! matrix and a row-aligned label vector.
use ndarray::Array2;

use crate::data_handling::{Dataset, Table, Value};
use crate::error::EvalError;
use crate::labels::Label;

/// Split a dataset into features and labels using its profile's encodings.
///
/// Missing feature cells become `NaN`. Row count and row order always match
/// the source table.
pub fn to_xy(dataset: &Dataset) -> Result<(Array2<f64>, Vec<Label>), EvalError> {
    let profile = dataset.id.profile();
    let (features, labels) = (profile.split_features)(&dataset.table, profile.label_column)?;
    let x = feature_matrix(&features)?;
    let y: Vec<Label> = labels.iter().map(Label::from).collect();

    if x.nrows() != y.len() {
        return Err(EvalError::LengthMismatch {
            features: x.nrows(),
            labels: y.len(),
        });
    }

    log::debug!(
        "[{}] extracted {} samples x {} features",
        dataset.id,
        x.nrows(),
        x.ncols()
    );
    Ok((x, y))
}

/// Convert a fully encoded table into a dense matrix. Any text cell left at
/// this point is a misconfiguration and aborts the run.
pub fn feature_matrix(table: &Table) -> Result<Array2<f64>, EvalError> {
    let (nrows, ncols) = (table.nrows(), table.ncols());
    let mut data = Vec::with_capacity(nrows * ncols);
    for (row_idx, row) in table.rows().iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            data.push(match cell {
                Value::Number(v) => *v,
                Value::Missing => f64::NAN,
                Value::Text(s) => {
                    return Err(EvalError::NonNumericFeature {
                        column: table.columns()[col_idx].clone(),
                        row: row_idx,
                        value: s.clone(),
                    })
                }
            });
        }
    }
    Array2::from_shape_vec((nrows, ncols), data).map_err(|_| EvalError::ColumnCount {
        expected: ncols,
        found: table.rows().first().map(|r| r.len()).unwrap_or(0),
    })
}
