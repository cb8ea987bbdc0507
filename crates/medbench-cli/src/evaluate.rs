//! CLI glue for the `run` and `labels` subcommands.
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;

use medbench_classifiers::config::{load_eval_config, EvaluationConfig, ModelType};
use medbench_classifiers::datasets::DatasetId;
use medbench_classifiers::labels::{outcome_values, LabelDistribution};
use medbench_classifiers::loader::load;
use medbench_classifiers::runner::run_all_with;

/// Build the evaluation config from an optional JSON file, then apply
/// command-line overrides on top of it.
pub fn config_from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<EvaluationConfig> {
    let mut config = match config_path {
        Some(path) => load_eval_config(path)?,
        None => EvaluationConfig::default(),
    };

    if let Some(dir) = matches.get_one::<PathBuf>("data_dir") {
        config.data_dir = dir.clone();
    }
    if let Some(ids) = matches.get_many::<String>("dataset") {
        config.datasets = ids
            .map(|s| DatasetId::from_str(s))
            .collect::<Result<Vec<_>, _>>()?;
    }
    if let Some(names) = matches.get_many::<String>("model") {
        config.models = names
            .map(|s| ModelType::from_str(s))
            .collect::<Result<Vec<_>, _>>()?;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = *seed;
    }
    if let Some(fraction) = matches.get_one::<f64>("test_fraction") {
        config.test_fraction = *fraction;
    }
    if matches.get_flag("keep_going") {
        config.keep_going = true;
    }

    config.validate().context("Invalid evaluation settings")?;
    Ok(config)
}

/// Run the evaluation, writing each dataset's report to `out` as soon as
/// it is ready. Returns the number of datasets reported.
pub fn run_evaluation<W: Write>(config: &EvaluationConfig, out: &mut W) -> Result<usize> {
    let mut write_error = None;
    let reports = run_all_with(config, |report| {
        if write_error.is_none() {
            if let Err(e) = writeln!(out, "{}", report) {
                write_error = Some(e);
            }
        }
    })?;
    if let Some(e) = write_error {
        return Err(e).context("Failed to write report");
    }
    Ok(reports.len())
}

/// Load one dataset and count its labels.
pub fn summarize_labels<P: AsRef<Path>>(id: DatasetId, data_dir: P) -> Result<LabelDistribution> {
    let dataset = load(id, data_dir)?;
    Ok(outcome_values(&dataset)?)
}
