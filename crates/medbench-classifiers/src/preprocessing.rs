//! Preprocessing shared by the extractor and the training pipeline.
//!
//! Table-level encodings (one-hot expansion, category -> number maps) run
//! before the feature matrix exists. Mean imputation is fitted on training
//! rows only and then applied unchanged to both sides of the split.
use std::collections::BTreeSet;

use ndarray::{Array2, Axis};

use crate::data_handling::{Table, Value};
use crate::error::EvalError;

/// Expand one categorical column into 0/1 indicator columns, one per
/// distinct non-missing value in sorted order. Missing cells produce an
/// all-zero indicator row. Columns are named `<column>_<category>`.
pub fn one_hot_encode(table: &Table, column: usize) -> Result<Table, EvalError> {
    let values = table.column(column);
    let categories: BTreeSet<String> = values
        .iter()
        .filter(|v| !v.is_missing())
        .map(|v| v.to_string())
        .collect();
    let categories: Vec<String> = categories.into_iter().collect();

    let prefix = &table.columns()[column];
    let names = categories
        .iter()
        .map(|c| format!("{}_{}", prefix, c))
        .collect::<Vec<_>>();

    let rows: Vec<Vec<Value>> = values
        .iter()
        .map(|v| {
            let key = if v.is_missing() { None } else { Some(v.to_string()) };
            categories
                .iter()
                .map(|c| {
                    if key.as_deref() == Some(c.as_str()) {
                        Value::Number(1.0)
                    } else {
                        Value::Number(0.0)
                    }
                })
                .collect::<Vec<Value>>()
        })
        .collect();

    Table::new(names, rows)
}

/// Replace text cells that exactly match a category with its number.
pub fn map_categories(table: &mut Table, mapping: &[(&str, f64)]) {
    table.map_values(|v| match v {
        Value::Text(s) => mapping
            .iter()
            .find(|(k, _)| *k == s.as_str())
            .map(|(_, n)| Value::Number(*n))
            .unwrap_or_else(|| v.clone()),
        other => other.clone(),
    });
}

/// Per-column mean imputation (`NaN` marks a missing cell).
#[derive(Clone, Debug, PartialEq)]
pub struct MeanImputer {
    /// `None` for a column with no observed value at fit time; such columns
    /// are removed by [`MeanImputer::transform`].
    pub means: Vec<Option<f64>>,
}

impl MeanImputer {
    /// Learn column means from the observed (non-`NaN`) cells of `x`.
    pub fn fit(x: &Array2<f64>) -> Self {
        let means = x
            .axis_iter(Axis(1))
            .map(|col| {
                let (sum, count) = col
                    .iter()
                    .filter(|v| !v.is_nan())
                    .fold((0.0f64, 0usize), |(s, c), v| (s + v, c + 1));
                if count == 0 {
                    None
                } else {
                    Some(sum / count as f64)
                }
            })
            .collect();
        MeanImputer { means }
    }

    /// Columns that survive imputation.
    pub fn kept_columns(&self) -> Vec<usize> {
        self.means
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.map(|_| i))
            .collect()
    }

    /// Fill `NaN` cells with the fitted means and drop columns that had no
    /// observed value during fitting. The result is always in standard
    /// (row-major) layout.
    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        assert_eq!(
            x.ncols(),
            self.means.len(),
            "imputer was fitted on a different number of columns"
        );
        let kept = self.kept_columns();
        // Column selection yields a column-major array; row-wise consumers
        // need contiguous rows.
        let mut out = x.select(Axis(1), &kept).as_standard_layout().into_owned();
        for (j, mut col) in out.axis_iter_mut(Axis(1)).enumerate() {
            let mean = self.means[kept[j]].unwrap_or(0.0);
            col.mapv_inplace(|v| if v.is_nan() { mean } else { v });
        }
        out
    }
}
