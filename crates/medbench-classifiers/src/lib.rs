//! medbench-classifiers: benchmark four classifiers on four medical datasets.
//!
//! The crate loads each dataset from its delimited source files, applies the
//! dataset-specific cleanup and encodings, and runs every classifier through
//! the same seeded train/test pipeline (train-only mean imputation, fit,
//! predict) before scoring the held-out predictions.
//!
//! Classifiers come from the linfa family; everything around them is kept
//! small and deterministic so that two runs with the same seed agree bit for
//! bit.
pub mod config;
pub mod data_handling;
pub mod datasets;
pub mod error;
pub mod extract;
pub mod io;
pub mod labels;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod report;
pub mod runner;

pub use config::{load_eval_config, EvaluationConfig, ModelType};
pub use datasets::DatasetId;
pub use error::EvalError;
pub use runner::{run_all, run_all_with, DatasetReport, ModelRun};
