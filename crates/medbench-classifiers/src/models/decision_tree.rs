use anyhow::{Context, Result};
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};

use crate::error::EvalError;
use crate::models::classifier_trait::ClassifierModel;

/// Depth-bounded CART decision tree (Gini impurity).
pub struct DecisionTreeClassifier {
    model: Option<DecisionTree<f64, usize>>,
    max_depth: usize,
}

impl DecisionTreeClassifier {
    pub fn new(max_depth: usize) -> Self {
        DecisionTreeClassifier {
            model: None,
            max_depth,
        }
    }
}

impl ClassifierModel for DecisionTreeClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()> {
        let dataset = Dataset::new(x.to_owned(), Array1::from_vec(y.to_vec()));
        let model = DecisionTree::params()
            .max_depth(Some(self.max_depth))
            .fit(&dataset)
            .context("Failed to fit decision tree")?;
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
        "decision_tree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn separates_a_threshold() {
        let x = array![[0.0], [1.0], [2.0], [10.0], [11.0], [12.0]];
        let y = vec![0, 0, 0, 1, 1, 1];
        let mut model = DecisionTreeClassifier::new(5);
        model.fit(&x, &y).unwrap();
        assert_eq!(model.predict(&array![[0.5], [11.5]]).unwrap(), vec![0, 1]);
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = DecisionTreeClassifier::new(5);
        assert!(model.predict(&array![[1.0]]).is_err());
    }
}
