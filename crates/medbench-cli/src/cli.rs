use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

pub const DATASET_NAMES: [&str; 5] = [
    "breast_cancer",
    "hyperthyroidism",
    "cervical_cancer",
    "liver_cancer",
    "liver",
];

/// Command-line definition of the `medbench` binary.
pub fn build_cli() -> Command {
    Command::new("medbench")
        .version(clap::crate_version!())
        .about("Evaluate classic classifiers on tabular medical datasets")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Evaluate every selected model on every selected dataset")
                .arg(
                    Arg::new("config")
                        .help("Path to evaluation JSON configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data_dir")
                        .short('d')
                        .long("data-dir")
                        .help("Directory holding one sub-directory per dataset. Overrides the config file.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("dataset")
                        .long("dataset")
                        .help("Restrict the run to this dataset (repeatable).")
                        .action(ArgAction::Append)
                        .value_parser(DATASET_NAMES),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .help("Restrict the run to this model with default settings (repeatable).")
                        .action(ArgAction::Append)
                        .value_parser(["decision_tree", "knn", "naive_bayes", "svm"]),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for the train/test partition.")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("test_fraction")
                        .long("test-fraction")
                        .help("Fraction of rows held out for testing, in (0, 1).")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("keep_going")
                        .long("keep-going")
                        .help("Skip datasets that fail instead of aborting.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("labels")
                .about("Print the label distribution of one dataset")
                .arg(
                    Arg::new("dataset")
                        .help("Dataset to summarize")
                        .required(true)
                        .value_parser(DATASET_NAMES),
                )
                .arg(
                    Arg::new("data_dir")
                        .short('d')
                        .long("data-dir")
                        .help("Directory holding one sub-directory per dataset.")
                        .default_value("data")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                ),
        )
}
