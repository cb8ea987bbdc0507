//! Registry of the supported datasets.
//!
//! Each [`DatasetId`] resolves once to a static [`DatasetProfile`] that
//! records where its files live, which column holds the label, the
//! structural fixes applied before numeric coercion, and the encodings that
//! turn the coerced table into features and labels.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data_handling::{Table, Value};
use crate::error::EvalError;
use crate::preprocessing::{map_categories, one_hot_encode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetId {
    BreastCancer,
    Hyperthyroidism,
    CervicalCancer,
    LiverCancer,
}

impl DatasetId {
    /// All datasets in evaluation order.
    pub const ALL: [DatasetId; 4] = [
        DatasetId::BreastCancer,
        DatasetId::Hyperthyroidism,
        DatasetId::CervicalCancer,
        DatasetId::LiverCancer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DatasetId::BreastCancer => "breast_cancer",
            DatasetId::Hyperthyroidism => "hyperthyroidism",
            DatasetId::CervicalCancer => "cervical_cancer",
            DatasetId::LiverCancer => "liver_cancer",
        }
    }

    pub fn profile(&self) -> &'static DatasetProfile {
        match self {
            DatasetId::BreastCancer => &BREAST_CANCER,
            DatasetId::Hyperthyroidism => &HYPERTHYROIDISM,
            DatasetId::CervicalCancer => &CERVICAL_CANCER,
            DatasetId::LiverCancer => &LIVER_CANCER,
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetId {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "breast_cancer" => Ok(DatasetId::BreastCancer),
            "hyperthyroidism" => Ok(DatasetId::Hyperthyroidism),
            "cervical_cancer" => Ok(DatasetId::CervicalCancer),
            "liver_cancer" | "liver" => Ok(DatasetId::LiverCancer),
            _ => Err(EvalError::UnknownDataset(s.to_string())),
        }
    }
}

/// Which column of the loaded table holds the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColumn {
    Index(usize),
    Last,
}

impl LabelColumn {
    pub fn resolve(&self, ncols: usize) -> usize {
        match self {
            LabelColumn::Index(i) => *i,
            LabelColumn::Last => ncols.saturating_sub(1),
        }
    }
}

/// One source file, relative to the data directory.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile {
    pub path: &'static str,
    pub has_headers: bool,
}

/// Load and extract strategy for one dataset.
pub struct DatasetProfile {
    pub id: DatasetId,
    /// Read in order and concatenated row-wise.
    pub sources: &'static [SourceFile],
    pub label_column: LabelColumn,
    /// Structural fixes applied to the raw text table.
    pub restructure: fn(Table) -> Result<Table, EvalError>,
    /// Split a coerced table into a feature table and the label cells.
    pub split_features: fn(&Table, LabelColumn) -> Result<(Table, Vec<Value>), EvalError>,
}

impl fmt::Debug for DatasetProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetProfile")
            .field("id", &self.id)
            .field("sources", &self.sources)
            .field("label_column", &self.label_column)
            .finish_non_exhaustive()
    }
}

/// Diagnostic outcomes that are alternatives to (or derived from) the biopsy
/// result and would leak the label.
pub const CERVICAL_LEAKAGE_COLUMNS: [&str; 7] = [
    "Dx:Cancer",
    "Dx:CIN",
    "Dx:HPV",
    "Dx",
    "Hinselmann",
    "Schiller",
    "Citology",
];

static BREAST_CANCER: DatasetProfile = DatasetProfile {
    id: DatasetId::BreastCancer,
    sources: &[SourceFile {
        path: "breast_cancer/wdbc.data",
        has_headers: false,
    }],
    label_column: LabelColumn::Index(1),
    restructure: keep_as_is,
    split_features: split_label,
};

static HYPERTHYROIDISM: DatasetProfile = DatasetProfile {
    id: DatasetId::Hyperthyroidism,
    sources: &[
        SourceFile {
            path: "hyperthyroidism/allhyper.data",
            has_headers: false,
        },
        SourceFile {
            path: "hyperthyroidism/allhyper.test",
            has_headers: false,
        },
    ],
    label_column: LabelColumn::Last,
    restructure: strip_label_suffix,
    split_features: hyperthyroid_features,
};

static CERVICAL_CANCER: DatasetProfile = DatasetProfile {
    id: DatasetId::CervicalCancer,
    sources: &[SourceFile {
        path: "cervical_cancer/risk_factors_cervical_cancer.csv",
        has_headers: true,
    }],
    label_column: LabelColumn::Last,
    restructure: drop_leakage_columns,
    split_features: split_label,
};

static LIVER_CANCER: DatasetProfile = DatasetProfile {
    id: DatasetId::LiverCancer,
    sources: &[SourceFile {
        path: "liver_cancer/ilpd.csv",
        has_headers: false,
    }],
    label_column: LabelColumn::Last,
    restructure: keep_as_is,
    split_features: liver_features,
};

fn keep_as_is(table: Table) -> Result<Table, EvalError> {
    Ok(table)
}

/// `negative.|3733` -> `negative`: keep the label up to its first period.
fn strip_label_suffix(mut table: Table) -> Result<Table, EvalError> {
    if table.ncols() == 0 {
        return Ok(table);
    }
    let label_idx = table.ncols() - 1;
    table.map_column(label_idx, |v| match v {
        Value::Text(s) => match s.split_once('.') {
            Some((head, _)) => Value::Text(head.to_string()),
            None => Value::Text(s.clone()),
        },
        other => other.clone(),
    });
    Ok(table)
}

fn drop_leakage_columns(table: Table) -> Result<Table, EvalError> {
    table.drop_columns(&CERVICAL_LEAKAGE_COLUMNS)
}

/// Features are every column except the label, in original order.
pub fn split_label(table: &Table, label: LabelColumn) -> Result<(Table, Vec<Value>), EvalError> {
    if table.ncols() < 2 {
        return Err(EvalError::ColumnCount {
            expected: 2,
            found: table.ncols(),
        });
    }
    let label_idx = label.resolve(table.ncols());
    if label_idx >= table.ncols() {
        return Err(EvalError::ColumnCount {
            expected: label_idx + 1,
            found: table.ncols(),
        });
    }
    let keep: Vec<usize> = (0..table.ncols()).filter(|&i| i != label_idx).collect();
    Ok((table.select_columns(&keep), table.column(label_idx)))
}

/// The categorical column just before the label is one-hot expanded and
/// appended after the remaining features; residual `F`/`M` and `f`/`t`
/// flags anywhere in the features become 0/1.
fn hyperthyroid_features(table: &Table, _label: LabelColumn) -> Result<(Table, Vec<Value>), EvalError> {
    let n = table.ncols();
    if n < 3 {
        return Err(EvalError::ColumnCount {
            expected: 3,
            found: n,
        });
    }
    let head: Vec<usize> = (0..n - 2).collect();
    let indicators = one_hot_encode(table, n - 2)?;
    let mut features = table.select_columns(&head).hstack(&indicators)?;
    map_categories(
        &mut features,
        &[("F", 0.0), ("M", 1.0), ("f", 0.0), ("t", 1.0)],
    );
    Ok((features, table.column(n - 1)))
}

fn liver_features(table: &Table, label: LabelColumn) -> Result<(Table, Vec<Value>), EvalError> {
    let (mut features, labels) = split_label(table, label)?;
    map_categories(&mut features, &[("Female", 0.0), ("Male", 1.0)]);
    Ok((features, labels))
}
