use anyhow::Result;
use clap::ArgMatches;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use medbench_classifiers::datasets::DatasetId;
use medbench_cli::cli::build_cli;
use medbench_cli::evaluate::{config_from_arguments, run_evaluation, summarize_labels};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MEDBENCH_LOG", "error,medbench=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", sub_m)) => handle_run(sub_m),
        Some(("labels", sub_m)) => handle_labels(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let config_path: Option<&PathBuf> = matches.get_one("config");
    match config_path {
        Some(path) => eprintln!("[medbench] Using config: {:?}", path),
        None => eprintln!("[medbench] No config provided; using defaults."),
    }

    let config = config_from_arguments(config_path, matches)?;
    if config_path.is_none() {
        let default_json = serde_json::to_string_pretty(&config).unwrap_or_default();
        eprintln!("[medbench] Effective config:\n{}", default_json);
    }

    let stdout = std::io::stdout();
    match run_evaluation(&config, &mut stdout.lock()) {
        Ok(n) => {
            eprintln!("[medbench] Completed evaluation of {} dataset(s).", n);
            Ok(())
        }
        Err(e) => {
            log::error!("Evaluation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_labels(matches: &ArgMatches) -> Result<()> {
    let name: &String = matches
        .get_one("dataset")
        .ok_or_else(|| anyhow::anyhow!("dataset argument is required"))?;
    let data_dir: &PathBuf = matches
        .get_one("data_dir")
        .ok_or_else(|| anyhow::anyhow!("data directory argument is required"))?;
    let id = DatasetId::from_str(name)?;

    let distribution = summarize_labels(id, data_dir)?;
    println!("{}: {}", id, distribution);
    Ok(())
}
