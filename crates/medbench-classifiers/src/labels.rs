//! Outcome labels, their distribution per dataset, and the label <-> class
//! index mapping used by the models.
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Serialize, Serializer};

use crate::data_handling::{Dataset, Value};
use crate::error::EvalError;

/// Canonical label key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Class(String),
    Missing,
}

impl Label {
    pub fn class(name: impl Into<String>) -> Self {
        Label::Class(name.into())
    }
}

impl From<&Value> for Label {
    fn from(value: &Value) -> Self {
        match value {
            Value::Missing => Label::Missing,
            other => Label::Class(other.to_string()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Class(s) => write!(f, "{}", s),
            Label::Missing => write!(f, "<missing>"),
        }
    }
}

impl Ord for Label {
    /// Numeric labels compare numerically, text lexically, missing last.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Label::Missing, Label::Missing) => Ordering::Equal,
            (Label::Missing, _) => Ordering::Greater,
            (_, Label::Missing) => Ordering::Less,
            (Label::Class(a), Label::Class(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => a.cmp(b),
            },
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Occurrence count per distinct label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelDistribution {
    counts: BTreeMap<Label, usize>,
}

impl LabelDistribution {
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a Label>,
    {
        let mut counts = BTreeMap::new();
        for label in labels {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        LabelDistribution { counts }
    }

    pub fn get(&self, label: &Label) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.counts.keys()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for LabelDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, (label, count)) in self.counts.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", label, count)?;
        }
        write!(f, "}}")
    }
}

/// Label values of a dataset, read from its profile's label column.
pub fn label_column(dataset: &Dataset) -> Result<Vec<Label>, EvalError> {
    let ncols = dataset.table.ncols();
    let idx = dataset.id.profile().label_column.resolve(ncols);
    if ncols < 2 || idx >= ncols {
        return Err(EvalError::ColumnCount {
            expected: idx.max(1) + 1,
            found: ncols,
        });
    }
    Ok(dataset.table.column(idx).iter().map(Label::from).collect())
}

/// Count each distinct outcome value over all rows. Missing labels are
/// counted under [`Label::Missing`].
pub fn outcome_values(dataset: &Dataset) -> Result<LabelDistribution, EvalError> {
    Ok(LabelDistribution::from_labels(label_column(dataset)?.iter()))
}

/// Bijection between labels and dense class indices `0..n`, ordered by
/// [`Label`]'s ordering.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<Label>,
    index: HashMap<Label, usize>,
}

impl LabelEncoder {
    pub fn fit(labels: &[Label]) -> Self {
        let mut classes: Vec<Label> = labels.to_vec();
        classes.sort();
        classes.dedup();
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        LabelEncoder { classes, index }
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    /// Encode labels seen at fit time.
    pub fn transform(&self, labels: &[Label]) -> Result<Vec<usize>, EvalError> {
        labels
            .iter()
            .map(|l| {
                self.index
                    .get(l)
                    .copied()
                    .ok_or_else(|| EvalError::UnknownLabel(l.to_string()))
            })
            .collect()
    }

    pub fn inverse_transform(&self, indices: &[usize]) -> Vec<Label> {
        indices.iter().map(|&i| self.classes[i].clone()).collect()
    }
}
