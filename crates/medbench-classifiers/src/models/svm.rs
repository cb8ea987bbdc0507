use anyhow::{Context, Result};
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_svm::Svm;
use ndarray::{Array1, Array2, Axis};

use crate::error::EvalError;
use crate::models::classifier_trait::ClassifierModel;

/// Binary RBF machine separating `positive` from `negative`.
struct PairwiseMachine {
    positive: usize,
    negative: usize,
    model: Svm<f64, bool>,
}

/// Kernel SVM with a radial basis kernel.
///
/// Multi-class problems are handled one-vs-one: one binary machine per pair
/// of classes seen in training, each casting a vote per sample. The class
/// with the most votes wins, ties going to the smallest class index.
pub struct SVMClassifier {
    c: f64,
    gamma: f64,
    eps: f64,
    machines: Vec<PairwiseMachine>,
    /// Set when training saw a single class; every prediction is that class.
    constant: Option<usize>,
    n_classes: usize,
}

impl SVMClassifier {
    pub fn new(c: f64, gamma: f64, eps: f64) -> Self {
        SVMClassifier {
            c,
            gamma,
            eps,
            machines: Vec::new(),
            constant: None,
            n_classes: 0,
        }
    }

    fn fit_pair(&self, x: &Array2<f64>, y: &[usize], positive: usize, negative: usize) -> Result<PairwiseMachine> {
        let rows: Vec<usize> = (0..y.len())
            .filter(|&i| y[i] == positive || y[i] == negative)
            .collect();
        let records = x.select(Axis(0), &rows);
        let targets: Array1<bool> = rows.iter().map(|&i| y[i] == positive).collect();
        let dataset = Dataset::new(records, targets);

        // linfa's Gaussian kernel is exp(-||x - y||^2 / eps), so eps = 1 / gamma.
        let model = Svm::<f64, bool>::params()
            .eps(self.eps)
            .pos_neg_weights(self.c, self.c)
            .gaussian_kernel(1.0 / self.gamma)
            .fit(&dataset)
            .with_context(|| format!("Failed to fit SVM for classes {} vs {}", positive, negative))?;

        Ok(PairwiseMachine {
            positive,
            negative,
            model,
        })
    }
}

impl ClassifierModel for SVMClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()> {
        if x.nrows() == 0 || x.nrows() != y.len() {
            return Err(EvalError::LengthMismatch {
                features: x.nrows(),
                labels: y.len(),
            }
            .into());
        }
        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        self.n_classes = classes.last().map_or(0, |c| c + 1);
        self.machines.clear();
        self.constant = None;

        if classes.len() == 1 {
            log::warn!("SVM training data contains a single class; predictions will be constant");
            self.constant = Some(classes[0]);
            return Ok(());
        }

        for (i, &positive) in classes.iter().enumerate() {
            for &negative in &classes[i + 1..] {
                let machine = self.fit_pair(x, y, positive, negative)?;
                self.machines.push(machine);
            }
        }
        log::debug!(
            "Fitted {} pairwise SVM(s) over {} classes",
            self.machines.len(),
            classes.len()
        );
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        if let Some(class) = self.constant {
            return Ok(vec![class; x.nrows()]);
        }
        if self.machines.is_empty() {
            return Err(EvalError::NotFitted(self.name().to_string()).into());
        }

        let mut votes = Array2::<usize>::zeros((x.nrows(), self.n_classes));
        for machine in &self.machines {
            let decisions: Array1<bool> = machine.model.predict(x);
            for (row, &is_positive) in decisions.iter().enumerate() {
                let winner = if is_positive {
                    machine.positive
                } else {
                    machine.negative
                };
                votes[(row, winner)] += 1;
            }
        }

        Ok(votes
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = 0;
                for (class, &count) in row.iter().enumerate() {
                    if count > row[best] {
                        best = class;
                    }
                }
                best
            })
            .collect())
    }

    fn name(&self) -> &str {
        "svm"
    }
}
