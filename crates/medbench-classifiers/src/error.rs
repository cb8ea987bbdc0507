use thiserror::Error;

/// Domain failures raised by the evaluation pipeline.
///
/// I/O problems are reported through `anyhow` with the offending path as
/// context; these variants cover everything that goes wrong once the bytes
/// have been read.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("unknown dataset '{0}'. Valid options are: breast_cancer, hyperthyroidism, cervical_cancer, liver_cancer")]
    UnknownDataset(String),

    #[error("unknown model type '{0}'. Valid options are: decision_tree, knn, naive_bayes, svm")]
    UnknownModel(String),

    #[error("column '{0}' not found in table")]
    MissingColumn(String),

    #[error("schema mismatch: expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("non-numeric value '{value}' in feature column '{column}' (row {row})")]
    NonNumericFeature {
        column: String,
        row: usize,
        value: String,
    },

    #[error("feature matrix has {features} rows but {labels} labels were given")]
    LengthMismatch { features: usize, labels: usize },

    #[error("cannot split {n_samples} rows with test fraction {test_fraction}")]
    InvalidSplit { n_samples: usize, test_fraction: f64 },

    #[error("dataset '{0}' has no rows")]
    EmptyDataset(String),

    #[error("label '{0}' was not seen when fitting the label encoder")]
    UnknownLabel(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("model '{0}' has not been fitted")]
    NotFitted(String),
}
