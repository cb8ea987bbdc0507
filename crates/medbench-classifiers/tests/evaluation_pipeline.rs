mod common;

use medbench_classifiers::config::{EvaluationConfig, ModelType};
use medbench_classifiers::datasets::DatasetId;
use medbench_classifiers::extract::to_xy;
use medbench_classifiers::labels::{outcome_values, Label};
use medbench_classifiers::loader::load;
use medbench_classifiers::metrics::Averaging;
use medbench_classifiers::pipeline::{self, PipelineOptions};
use medbench_classifiers::runner::{run_all, run_all_with};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config_for(dir: &std::path::Path) -> EvaluationConfig {
    EvaluationConfig {
        data_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn loads_every_dataset_layout() {
    init_logging();
    let dir = common::data_dir();

    let breast = load(DatasetId::BreastCancer, dir.path()).unwrap();
    let dist = outcome_values(&breast).unwrap();
    assert_eq!(dist.len(), 2);
    assert_eq!(dist.total(), 40);

    let hyper = load(DatasetId::Hyperthyroidism, dir.path()).unwrap();
    assert_eq!(hyper.table.nrows(), 36, "train and test files are concatenated");
    let dist = outcome_values(&hyper).unwrap();
    assert_eq!(dist.get(&Label::class("negative")), 12);
    assert_eq!(dist.get(&Label::class("T3 toxic")), 12);

    let cervical = load(DatasetId::CervicalCancer, dir.path()).unwrap();
    assert_eq!(
        cervical.table.columns(),
        &["Age", "Smokes", "Number of sexual partners", "Biopsy"].map(String::from)
    );

    let liver = load(DatasetId::LiverCancer, dir.path()).unwrap();
    let dist = outcome_values(&liver).unwrap();
    assert_eq!(dist.get(&Label::class("1")) + dist.get(&Label::class("2")), 36);
}

#[test]
fn features_and_labels_stay_aligned() {
    let dir = common::data_dir();
    for id in DatasetId::ALL {
        let dataset = load(id, dir.path()).unwrap();
        let (x, y) = to_xy(&dataset).unwrap();
        assert_eq!(x.nrows(), y.len(), "{}", id);
        assert_eq!(x.nrows(), dataset.table.nrows(), "{}", id);
    }
}

#[test]
fn all_missing_row_is_imputed() {
    let dir = common::data_dir();
    let dataset = load(DatasetId::CervicalCancer, dir.path()).unwrap();
    let (x, y) = to_xy(&dataset).unwrap();
    assert!(x.row(4).iter().all(|v| v.is_nan()));

    let preds = pipeline::run(&x, &y, &ModelType::DecisionTree { max_depth: 5 }, &PipelineOptions::default())
        .unwrap();
    assert_eq!(preds.n_train + preds.n_test, x.nrows());
}

#[test]
fn full_run_covers_every_pair() {
    init_logging();
    let dir = common::data_dir();
    let reports = run_all(&config_for(dir.path())).unwrap();

    let ids: Vec<_> = reports.iter().map(|r| r.dataset).collect();
    assert_eq!(ids, DatasetId::ALL.to_vec());
    for report in &reports {
        let models: Vec<_> = report.runs.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["decision_tree", "knn", "naive_bayes", "svm"]);
        for run in &report.runs {
            assert_eq!(run.n_train + run.n_test, report.n_samples);
            assert!((0.0..=1.0).contains(&run.result.accuracy));
            assert_eq!(run.result.per_class.len(), report.distribution.len());
            for s in run.result.per_class.values() {
                for v in [s.precision, s.recall, s.f1] {
                    assert!((0.0..=1.0).contains(&v));
                }
            }
        }
        // one seed, one partition for every model of a dataset
        assert!(report.runs.windows(2).all(|w| w[0].n_test == w[1].n_test));
    }

    let hyper = &reports[1];
    assert!(hyper.runs.iter().all(|r| r.result.averaging == Averaging::Macro));
    let liver = &reports[3];
    assert!(liver.runs.iter().all(|r| r.result.averaging == Averaging::Binary));
}

#[test]
fn repeated_runs_are_identical() {
    let dir = common::data_dir();
    let config = config_for(dir.path());
    assert_eq!(run_all(&config).unwrap(), run_all(&config).unwrap());
}

#[test]
fn missing_file_fails_fast() {
    let dir = common::data_dir();
    std::fs::remove_file(dir.path().join("liver_cancer/ilpd.csv")).unwrap();

    let err = run_all(&config_for(dir.path())).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("liver_cancer"), "{}", msg);
    assert!(msg.contains("ilpd.csv"), "{}", msg);
}

#[test]
fn keep_going_skips_broken_dataset() {
    let dir = common::data_dir();
    std::fs::remove_file(dir.path().join("breast_cancer/wdbc.data")).unwrap();

    let config = EvaluationConfig {
        keep_going: true,
        ..config_for(dir.path())
    };
    let mut seen = Vec::new();
    let reports = run_all_with(&config, |r| seen.push(r.dataset)).unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(seen, vec![DatasetId::Hyperthyroidism, DatasetId::CervicalCancer, DatasetId::LiverCancer]);
}
