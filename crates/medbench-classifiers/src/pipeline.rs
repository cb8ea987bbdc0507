//! Training pipeline: seeded train/test partition, train-only imputation,
//! fit, predict.
use anyhow::{Context, Result};
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::ModelType;
use crate::error::EvalError;
use crate::labels::{Label, LabelEncoder};
use crate::models::build_model;
use crate::preprocessing::MeanImputer;

/// Row indices of each side of a train/test partition.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Features and labels of both sides of a partition.
#[derive(Debug, Clone)]
pub struct Split {
    pub indices: SplitIndices,
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Vec<Label>,
    pub y_test: Vec<Label>,
}

/// Knobs shared by every pipeline run of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOptions {
    pub seed: u64,
    pub test_fraction: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            seed: 42,
            test_fraction: 0.2,
        }
    }
}

/// Test-side predictions of one run, aligned position by position with the
/// true labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    pub predicted: Vec<Label>,
    pub actual: Vec<Label>,
    pub n_train: usize,
    pub n_test: usize,
}

/// Shuffle `0..n_samples` with a seeded RNG; the first
/// `ceil(n_samples * test_fraction)` indices form the test side.
pub fn train_test_split(n_samples: usize, test_fraction: f64, seed: u64) -> Result<SplitIndices, EvalError> {
    let invalid = || EvalError::InvalidSplit {
        n_samples,
        test_fraction,
    };
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(invalid());
    }
    let n_test = (n_samples as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(invalid());
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(SplitIndices {
        train,
        test: indices,
    })
}

fn select<T: Clone>(items: &[T], rows: &[usize]) -> Vec<T> {
    rows.iter().map(|&i| items[i].clone()).collect()
}

/// Partition paired features and labels; row pairing is preserved on both
/// sides.
pub fn split(features: &Array2<f64>, labels: &[Label], test_fraction: f64, seed: u64) -> Result<Split, EvalError> {
    if features.nrows() != labels.len() {
        return Err(EvalError::LengthMismatch {
            features: features.nrows(),
            labels: labels.len(),
        });
    }
    let indices = train_test_split(features.nrows(), test_fraction, seed)?;
    Ok(Split {
        x_train: features.select(Axis(0), &indices.train),
        x_test: features.select(Axis(0), &indices.test),
        y_train: select(labels, &indices.train),
        y_test: select(labels, &indices.test),
        indices,
    })
}

/// Partition, impute, fit a fresh `model` and predict the held-out rows.
pub fn run(
    features: &Array2<f64>,
    labels: &[Label],
    model: &ModelType,
    options: &PipelineOptions,
) -> Result<Predictions> {
    let Split {
        indices,
        x_train,
        x_test,
        y_train,
        y_test,
    } = split(features, labels, options.test_fraction, options.seed)?;

    let imputer = MeanImputer::fit(&x_train);
    let dropped = imputer.means.len() - imputer.kept_columns().len();
    if dropped > 0 {
        log::warn!(
            "{} feature column(s) have no observed training value and were dropped",
            dropped
        );
    }
    let x_train = imputer.transform(&x_train);
    let x_test = imputer.transform(&x_test);

    let encoder = LabelEncoder::fit(labels);
    let y_train = encoder.transform(&y_train)?;

    let mut classifier = build_model(model);
    classifier
        .fit(&x_train, &y_train)
        .with_context(|| format!("Failed to fit {}", model.name()))?;
    let predicted = classifier
        .predict(&x_test)
        .with_context(|| format!("Failed to predict with {}", model.name()))?;

    log::debug!(
        "{}: trained on {} rows ({} features), predicted {} rows",
        model.name(),
        x_train.nrows(),
        x_train.ncols(),
        x_test.nrows()
    );

    Ok(Predictions {
        predicted: encoder.inverse_transform(&predicted),
        actual: y_test,
        n_train: indices.train.len(),
        n_test: indices.test.len(),
    })
}
