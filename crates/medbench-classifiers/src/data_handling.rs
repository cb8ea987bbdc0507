//! In-memory tabular data shared by the loader, the label summarizer and the
//! feature extractor.
//!
//! Cells start life as raw text read from disk and are coerced to numbers
//! once the dataset-specific structural fixes have been applied. Anything
//! that does not parse stays as text so categorical columns (sex, diagnosis
//! names) survive until the extractor encodes them.
use std::fmt;

use crate::datasets::DatasetId;
use crate::error::EvalError;

/// Literal used by every source file to mark a missing cell.
pub const MISSING_SENTINEL: &str = "?";

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Coerce a raw cell. Numbers parse, `?` and empty cells become missing,
    /// everything else keeps its text.
    pub fn coerce(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == MISSING_SENTINEL {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Value::Number(v),
            Err(_) => Value::Text(trimmed.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", format_number(*v)),
            Value::Text(s) => write!(f, "{}", s),
            Value::Missing => write!(f, "{}", MISSING_SENTINEL),
        }
    }
}

/// Render integral floats without a fractional part (`1.0` -> `1`).
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Row-major table with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, checking every row against the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, EvalError> {
        if let Some(bad) = rows.iter().find(|r| r.len() != columns.len()) {
            return Err(EvalError::ColumnCount {
                expected: columns.len(),
                found: bad.len(),
            });
        }
        Ok(Table { columns, rows })
    }

    /// Positional column names `"0"`, `"1"`, ... for headerless sources.
    pub fn positional_columns(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, idx: usize) -> Vec<Value> {
        assert!(idx < self.ncols(), "column index out of bounds");
        self.rows.iter().map(|r| r[idx].clone()).collect()
    }

    /// Append the rows of `other`, which must share this table's width.
    /// Row order is preserved: all of `self`, then all of `other`.
    pub fn concat(mut self, other: Table) -> Result<Table, EvalError> {
        if other.ncols() != self.ncols() {
            return Err(EvalError::ColumnCount {
                expected: self.ncols(),
                found: other.ncols(),
            });
        }
        self.rows.extend(other.rows);
        Ok(self)
    }

    /// Remove columns by name. Every name must exist.
    pub fn drop_columns(&self, names: &[&str]) -> Result<Table, EvalError> {
        let mut drop = Vec::with_capacity(names.len());
        for name in names {
            let idx = self
                .column_index(name)
                .ok_or_else(|| EvalError::MissingColumn(name.to_string()))?;
            drop.push(idx);
        }
        let keep: Vec<usize> = (0..self.ncols()).filter(|i| !drop.contains(i)).collect();
        Ok(self.select_columns(&keep))
    }

    /// Project the table onto the given column positions, in that order.
    pub fn select_columns(&self, indices: &[usize]) -> Table {
        Table {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
                .collect(),
        }
    }

    /// Place the columns of `other` to the right of this table's columns.
    pub fn hstack(&self, other: &Table) -> Result<Table, EvalError> {
        if other.nrows() != self.nrows() {
            return Err(EvalError::LengthMismatch {
                features: self.nrows(),
                labels: other.nrows(),
            });
        }
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(l, r)| l.iter().chain(r.iter()).cloned().collect())
            .collect();
        Ok(Table { columns, rows })
    }

    pub fn map_column<F>(&mut self, idx: usize, mut f: F)
    where
        F: FnMut(&Value) -> Value,
    {
        for row in self.rows.iter_mut() {
            row[idx] = f(&row[idx]);
        }
    }

    pub fn map_values<F>(&mut self, mut f: F)
    where
        F: FnMut(&Value) -> Value,
    {
        for row in self.rows.iter_mut() {
            for cell in row.iter_mut() {
                *cell = f(cell);
            }
        }
    }

    /// Re-coerce every text cell, turning numeric strings into numbers and
    /// the missing sentinel into `Value::Missing`.
    pub fn coerce_numeric(&mut self) {
        self.map_values(|v| match v {
            Value::Text(s) => Value::coerce(s),
            other => other.clone(),
        });
    }
}

/// A loaded dataset: identifier plus its coerced table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: DatasetId,
    pub table: Table,
}

impl Dataset {
    pub fn new(id: DatasetId, table: Table) -> Self {
        Dataset { id, table }
    }

    pub fn log_input_data_summary(&self) {
        log::info!(
            "[{}] {} rows x {} columns, {} missing cells",
            self.id,
            self.table.nrows(),
            self.table.ncols(),
            self.table
                .rows()
                .iter()
                .flat_map(|r| r.iter())
                .filter(|v| v.is_missing())
                .count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_table(rows: &[&[&str]]) -> Table {
        let width = rows[0].len();
        Table::new(
            Table::positional_columns(width),
            rows.iter()
                .map(|r| r.iter().map(|s| Value::Text(s.to_string())).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn coerce_keeps_categoricals_and_marks_sentinel() {
        assert_eq!(Value::coerce("3.5"), Value::Number(3.5));
        assert_eq!(Value::coerce(" 12 "), Value::Number(12.0));
        assert_eq!(Value::coerce("?"), Value::Missing);
        assert_eq!(Value::coerce(""), Value::Missing);
        assert_eq!(Value::coerce("Male"), Value::Text("Male".to_string()));
    }

    #[test]
    fn concat_preserves_order_and_checks_width() {
        let a = text_table(&[&["1", "x"]]);
        let b = text_table(&[&["2", "y"], &["3", "z"]]);
        let joined = a.clone().concat(b).unwrap();
        assert_eq!(joined.nrows(), 3);
        assert_eq!(joined.rows()[0][0], Value::Text("1".into()));
        assert_eq!(joined.rows()[2][1], Value::Text("z".into()));

        let narrow = text_table(&[&["1"]]);
        assert!(a.concat(narrow).is_err());
    }

    #[test]
    fn drop_columns_requires_existing_names() {
        let t = Table::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]],
        )
        .unwrap();
        let dropped = t.drop_columns(&["b"]).unwrap();
        assert_eq!(dropped.columns(), &["a".to_string(), "c".to_string()]);
        assert_eq!(dropped.rows()[0], vec![Value::Number(1.0), Value::Number(3.0)]);
        assert!(matches!(
            t.drop_columns(&["nope"]),
            Err(EvalError::MissingColumn(_))
        ));
    }

    #[test]
    fn coerce_numeric_converts_text_cells() {
        let mut t = text_table(&[&["1", "?", "F"]]);
        t.coerce_numeric();
        assert_eq!(
            t.rows()[0],
            vec![Value::Number(1.0), Value::Missing, Value::Text("F".into())]
        );
    }

    #[test]
    fn format_number_drops_integral_fraction() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(2.5), "2.5");
    }
}
