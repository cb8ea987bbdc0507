//! Driver: every configured dataset crossed with every configured model.
use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::{EvaluationConfig, ModelType};
use crate::data_handling::Dataset;
use crate::datasets::DatasetId;
use crate::extract::to_xy;
use crate::labels::{outcome_values, LabelDistribution};
use crate::loader::load;
use crate::metrics::{evaluate, EvaluationResult};
use crate::pipeline::{self, PipelineOptions};

/// Result of one (dataset, model) pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRun {
    pub model: String,
    pub n_train: usize,
    pub n_test: usize,
    pub result: EvaluationResult,
}

/// Everything reported for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub dataset: DatasetId,
    pub distribution: LabelDistribution,
    pub n_samples: usize,
    pub n_features: usize,
    pub runs: Vec<ModelRun>,
}

/// Evaluate every model in `models` on an already loaded dataset. Each model
/// gets its own pipeline run over the same seeded partition.
pub fn run_dataset(
    dataset: &Dataset,
    models: &[ModelType],
    options: &PipelineOptions,
    metric_digits: u32,
) -> Result<DatasetReport> {
    let distribution = outcome_values(dataset)?;
    log::info!("[{}] label distribution: {}", dataset.id, distribution);

    let (features, labels) =
        to_xy(dataset).with_context(|| format!("Failed to extract features from '{}'", dataset.id))?;

    let mut runs = Vec::with_capacity(models.len());
    for model in models {
        let predictions = pipeline::run(&features, &labels, model, options)
            .with_context(|| format!("[{}] {} run failed", dataset.id, model.name()))?;
        let result = evaluate(
            &distribution,
            &predictions.actual,
            &predictions.predicted,
            metric_digits,
        )?;
        log::info!(
            "[{}] {}: accuracy {:.4} ({} averaging)",
            dataset.id,
            model.name(),
            result.accuracy,
            result.averaging
        );
        runs.push(ModelRun {
            model: model.name().to_string(),
            n_train: predictions.n_train,
            n_test: predictions.n_test,
            result,
        });
    }

    Ok(DatasetReport {
        dataset: dataset.id,
        distribution,
        n_samples: features.nrows(),
        n_features: features.ncols(),
        runs,
    })
}

/// Run the whole evaluation described by `config`.
pub fn run_all(config: &EvaluationConfig) -> Result<Vec<DatasetReport>> {
    run_all_with(config, |_| {})
}

/// Like [`run_all`], calling `on_report` as soon as each dataset finishes.
///
/// Fails on the first dataset error unless `config.keep_going` is set, in
/// which case the failing dataset is logged and left out of the result.
pub fn run_all_with<F>(config: &EvaluationConfig, mut on_report: F) -> Result<Vec<DatasetReport>>
where
    F: FnMut(&DatasetReport),
{
    config.validate()?;
    let options = config.pipeline_options();
    let mut reports = Vec::new();

    for id in config.ordered_datasets() {
        let outcome = load(id, &config.data_dir)
            .and_then(|dataset| run_dataset(&dataset, &config.models, &options, config.metric_digits));
        match outcome {
            Ok(report) => {
                on_report(&report);
                reports.push(report);
            }
            Err(e) if config.keep_going => {
                log::error!("Skipping dataset '{}': {:#}", id, e);
            }
            Err(e) => return Err(e.context(format!("Evaluation of '{}' failed", id))),
        }
    }
    Ok(reports)
}
