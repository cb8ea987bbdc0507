use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::datasets::DatasetId;
use crate::error::EvalError;
use crate::pipeline::PipelineOptions;

/// Supported classifier kinds and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    DecisionTree {
        max_depth: usize,
    },
    KNearestNeighbors {
        k: usize,
    },
    GaussianNB {
        var_smoothing: f64,
    },
    SVM {
        c: f64,
        /// RBF coefficient in `exp(-gamma * ||x - y||^2)`.
        gamma: f64,
        eps: f64,
    },
}

impl ModelType {
    /// The four classifiers in evaluation order, with their default settings.
    pub fn default_set() -> Vec<ModelType> {
        vec![
            ModelType::DecisionTree { max_depth: 5 },
            ModelType::KNearestNeighbors { k: 3 },
            ModelType::GaussianNB { var_smoothing: 1e-9 },
            ModelType::SVM {
                c: 1.0,
                gamma: 2.0,
                eps: 1e-3,
            },
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelType::DecisionTree { .. } => "decision_tree",
            ModelType::KNearestNeighbors { .. } => "knn",
            ModelType::GaussianNB { .. } => "naive_bayes",
            ModelType::SVM { .. } => "svm",
        }
    }

    fn validate(&self) -> Result<(), EvalError> {
        let bad = |msg: String| -> Result<(), EvalError> { Err(EvalError::InvalidConfig(msg)) };
        match self {
            ModelType::DecisionTree { max_depth } if *max_depth == 0 => {
                bad("decision_tree max_depth must be at least 1".to_string())
            }
            ModelType::KNearestNeighbors { k } if *k == 0 => bad("knn k must be at least 1".to_string()),
            ModelType::GaussianNB { var_smoothing } if *var_smoothing < 0.0 => {
                bad(format!("naive_bayes var_smoothing must be >= 0, got {}", var_smoothing))
            }
            ModelType::SVM { c, gamma, eps } if *c <= 0.0 || *gamma <= 0.0 || *eps <= 0.0 => bad(format!(
                "svm c, gamma and eps must be positive, got c={} gamma={} eps={}",
                c, gamma, eps
            )),
            _ => Ok(()),
        }
    }
}

impl FromStr for ModelType {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let defaults = ModelType::default_set();
        let pick = |name: &str| defaults.iter().find(|m| m.name() == name).cloned();
        let found = match s.to_lowercase().replace('-', "_").as_str() {
            "decision_tree" | "dt" | "tree" => pick("decision_tree"),
            "knn" | "k_nearest_neighbors" => pick("knn"),
            "naive_bayes" | "gaussian_nb" | "gnb" => pick("naive_bayes"),
            "svm" | "svc" => pick("svm"),
            _ => None,
        };
        found.ok_or_else(|| EvalError::UnknownModel(s.to_string()))
    }
}

/// Parameters for one evaluation run over datasets x classifiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Directory holding one sub-directory per dataset.
    pub data_dir: PathBuf,
    pub datasets: Vec<DatasetId>,
    pub models: Vec<ModelType>,
    /// Seed for the train/test partition; shared by every dataset and model.
    pub seed: u64,
    pub test_fraction: f64,
    /// Decimal places kept for per-class precision/recall/F1.
    pub metric_digits: u32,
    /// Log and skip a dataset that fails instead of aborting the run.
    pub keep_going: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            datasets: DatasetId::ALL.to_vec(),
            models: ModelType::default_set(),
            seed: 42,
            test_fraction: 0.2,
            metric_digits: 2,
            keep_going: false,
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<(), EvalError> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(EvalError::InvalidConfig(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.datasets.is_empty() {
            return Err(EvalError::InvalidConfig("no datasets selected".to_string()));
        }
        if self.models.is_empty() {
            return Err(EvalError::InvalidConfig("no models selected".to_string()));
        }
        for model in &self.models {
            model.validate()?;
        }
        Ok(())
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            seed: self.seed,
            test_fraction: self.test_fraction,
        }
    }

    /// Datasets in evaluation order, regardless of the order they were
    /// configured in. Duplicates are removed.
    pub fn ordered_datasets(&self) -> Vec<DatasetId> {
        DatasetId::ALL
            .iter()
            .copied()
            .filter(|id| self.datasets.contains(id))
            .collect()
    }
}

/// Load an evaluation configuration from a JSON file.
pub fn load_eval_config<P: AsRef<Path>>(path: P) -> Result<EvaluationConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: EvaluationConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.as_ref().display()))?;
    Ok(config)
}
