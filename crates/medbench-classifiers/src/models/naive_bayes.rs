use anyhow::{Context, Result};
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_bayes::GaussianNb;
use ndarray::{Array1, Array2};

use crate::error::EvalError;
use crate::models::classifier_trait::ClassifierModel;

/// Gaussian naive Bayes.
pub struct GaussianNBClassifier {
    model: Option<GaussianNb<f64, usize>>,
    var_smoothing: f64,
}

impl GaussianNBClassifier {
    pub fn new(var_smoothing: f64) -> Self {
        GaussianNBClassifier {
            model: None,
            var_smoothing,
        }
    }
}

impl ClassifierModel for GaussianNBClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()> {
        let dataset = Dataset::new(x.to_owned(), Array1::from_vec(y.to_vec()));
        let model = GaussianNb::params()
            .var_smoothing(self.var_smoothing)
            .fit(&dataset)
            .context("Failed to fit Gaussian naive Bayes")?;
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| EvalError::NotFitted(self.name().to_string()))?;
        let predictions: Array1<usize> = model.predict(x);
        Ok(predictions.to_vec())
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn recovers_two_gaussian_blobs() {
        let x = array![
            [0.0, 0.1],
            [0.2, -0.1],
            [-0.1, 0.0],
            [5.0, 5.1],
            [5.2, 4.9],
            [4.9, 5.0]
        ];
        let y = vec![0, 0, 0, 1, 1, 1];
        let mut model = GaussianNBClassifier::new(1e-9);
        model.fit(&x, &y).unwrap();
        assert_eq!(model.predict(&array![[0.1, 0.0], [5.0, 5.0]]).unwrap(), vec![0, 1]);
    }
}
