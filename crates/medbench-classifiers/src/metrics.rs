//! Classification metrics for one pipeline run.
//!
//! Accuracy is kept at full precision. Per-class precision, recall and F1
//! follow one of two policies chosen from the dataset's label count: binary
//! (each label scored as the positive class) or macro (unweighted mean over
//! classes, repeated under every label key).
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::error::EvalError;
use crate::labels::{Label, LabelDistribution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Averaging {
    Binary,
    Macro,
}

impl fmt::Display for Averaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Averaging::Binary => write!(f, "binary"),
            Averaging::Macro => write!(f, "macro"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ClassScores {
    fn rounded(self, digits: u32) -> Self {
        ClassScores {
            precision: round_to(self.precision, digits),
            recall: round_to(self.recall, digits),
            f1: round_to(self.f1, digits),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub accuracy: f64,
    pub averaging: Averaging,
    pub per_class: BTreeMap<Label, ClassScores>,
}

/// Round to `digits` decimal places, ties to even (`0.125` -> `0.12`).
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };
    rounded / factor
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// One-vs-rest confusion counts for `positive`.
#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    tp: usize,
    fp: usize,
    fn_: usize,
}

impl Counts {
    fn tally(positive: &Label, actual: &[Label], predicted: &[Label]) -> Self {
        let mut c = Counts::default();
        for (a, p) in actual.iter().zip(predicted) {
            match (a == positive, p == positive) {
                (true, true) => c.tp += 1,
                (false, true) => c.fp += 1,
                (true, false) => c.fn_ += 1,
                (false, false) => {}
            }
        }
        c
    }

    fn scores(&self) -> ClassScores {
        let precision = ratio(self.tp, self.tp + self.fp);
        let recall = ratio(self.tp, self.tp + self.fn_);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        ClassScores {
            precision,
            recall,
            f1,
        }
    }
}

pub fn accuracy(actual: &[Label], predicted: &[Label]) -> f64 {
    let hits = actual.iter().zip(predicted).filter(|(a, p)| a == p).count();
    ratio(hits, actual.len())
}

/// Score `predicted` against `actual`.
///
/// `labels_seen` is the full label distribution of the dataset; its number
/// of distinct labels picks the averaging policy and its keys name the
/// per-class entries.
pub fn evaluate(
    labels_seen: &LabelDistribution,
    actual: &[Label],
    predicted: &[Label],
    digits: u32,
) -> Result<EvaluationResult, EvalError> {
    if actual.len() != predicted.len() {
        return Err(EvalError::LengthMismatch {
            features: predicted.len(),
            labels: actual.len(),
        });
    }

    let averaging = if labels_seen.len() <= 2 {
        Averaging::Binary
    } else {
        Averaging::Macro
    };

    let per_class = match averaging {
        Averaging::Binary => labels_seen
            .labels()
            .map(|label| {
                let scores = Counts::tally(label, actual, predicted).scores();
                (label.clone(), scores.rounded(digits))
            })
            .collect(),
        Averaging::Macro => {
            let present: BTreeSet<&Label> = actual.iter().chain(predicted).collect();
            let n = present.len().max(1) as f64;
            let sum = present
                .iter()
                .map(|label| Counts::tally(label, actual, predicted).scores())
                .fold(ClassScores::default(), |acc, s| ClassScores {
                    precision: acc.precision + s.precision,
                    recall: acc.recall + s.recall,
                    f1: acc.f1 + s.f1,
                });
            let mean = ClassScores {
                precision: sum.precision / n,
                recall: sum.recall / n,
                f1: sum.f1 / n,
            }
            .rounded(digits);
            labels_seen.labels().map(|label| (label.clone(), mean)).collect()
        }
    };

    Ok(EvaluationResult {
        accuracy: accuracy(actual, predicted),
        averaging,
        per_class,
    })
}
