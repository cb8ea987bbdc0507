use std::collections::BTreeMap;

use anyhow::{Context, Result};
use linfa_nn::distance::L2Dist;
use linfa_nn::{KdTree, NearestNeighbour, NearestNeighbourIndex};
use ndarray::Array2;

use crate::error::EvalError;
use crate::models::classifier_trait::ClassifierModel;

/// k-nearest-neighbours with uniform majority voting over Euclidean
/// distance. The training matrix is kept and indexed with a k-d tree at
/// prediction time.
pub struct KNearestNeighborsClassifier {
    k: usize,
    train: Option<(Array2<f64>, Vec<usize>)>,
}

impl KNearestNeighborsClassifier {
    pub fn new(k: usize) -> Self {
        KNearestNeighborsClassifier { k, train: None }
    }
}

/// Most frequent class; ties go to the smallest class index.
fn majority_vote(classes: impl IntoIterator<Item = usize>) -> Option<usize> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for c in classes {
        *counts.entry(c).or_insert(0) += 1;
    }
    let mut best: Option<(usize, usize)> = None;
    for (class, count) in counts {
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((class, count));
        }
    }
    best.map(|(class, _)| class)
}

impl ClassifierModel for KNearestNeighborsClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()> {
        if x.nrows() == 0 || x.nrows() != y.len() {
            return Err(EvalError::LengthMismatch {
                features: x.nrows(),
                labels: y.len(),
            }
            .into());
        }
        // The k-d tree reads each row as a contiguous slice.
        self.train = Some((x.as_standard_layout().into_owned(), y.to_vec()));
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        let (train_x, train_y) = self
            .train
            .as_ref()
            .ok_or_else(|| EvalError::NotFitted(self.name().to_string()))?;
        let index = KdTree::new()
            .from_batch(train_x, L2Dist)
            .context("Failed to build k-d tree over training rows")?;
        let k = self.k.min(train_x.nrows());

        let queries = x.as_standard_layout();
        let mut predictions = Vec::with_capacity(queries.nrows());
        for row in queries.rows() {
            let neighbours = index
                .k_nearest(row, k)
                .context("Nearest neighbour query failed")?;
            let vote = majority_vote(neighbours.iter().map(|(_, idx)| train_y[*idx]))
                .ok_or_else(|| EvalError::NotFitted(self.name().to_string()))?;
            predictions.push(vote);
        }
        Ok(predictions)
    }

    fn name(&self) -> &str {
        "knn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::MeanImputer;
    use ndarray::{array, ShapeBuilder};

    #[test]
    fn majority_vote_breaks_ties_low() {
        assert_eq!(majority_vote(vec![2, 1, 2]), Some(2));
        assert_eq!(majority_vote(vec![2, 1, 0]), Some(0));
        assert_eq!(majority_vote(Vec::new()), None);
    }

    #[test]
    fn predicts_nearest_cluster() {
        let x = array![[0.0, 0.0], [0.1, 0.0], [0.0, 0.1], [5.0, 5.0], [5.1, 5.0], [5.0, 5.1]];
        let y = vec![0, 0, 0, 1, 1, 1];
        let mut model = KNearestNeighborsClassifier::new(3);
        model.fit(&x, &y).unwrap();
        assert_eq!(
            model.predict(&array![[0.05, 0.05], [4.9, 4.9]]).unwrap(),
            vec![0, 1]
        );
    }

    #[test]
    fn column_major_input_is_accepted() {
        let rows = array![[0.0, 0.0], [0.1, 0.0], [0.0, 0.1], [5.0, 5.0], [5.1, 5.0], [5.0, 5.1]];
        let mut x = Array2::<f64>::zeros((6, 2).f());
        x.assign(&rows);
        assert!(!x.is_standard_layout());
        let mut fortran_queries = Array2::<f64>::zeros((2, 2).f());
        fortran_queries.assign(&array![[0.05, 0.05], [4.9, 4.9]]);

        let mut model = KNearestNeighborsClassifier::new(3);
        model.fit(&x, &[0, 0, 0, 1, 1, 1]).unwrap();
        assert_eq!(model.predict(&fortran_queries).unwrap(), vec![0, 1]);
    }

    #[test]
    fn predicts_on_imputed_matrix() {
        let x = array![
            [0.0, 0.0, f64::NAN],
            [0.1, 0.0, 1.0],
            [0.0, 0.1, 1.0],
            [5.0, 5.0, 2.0],
            [5.1, 5.0, f64::NAN],
            [5.0, 5.1, 2.0]
        ];
        let imputed = MeanImputer::fit(&x).transform(&x);
        let mut model = KNearestNeighborsClassifier::new(3);
        model.fit(&imputed, &[0, 0, 0, 1, 1, 1]).unwrap();
        assert_eq!(model.predict(&imputed).unwrap(), vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn k_larger_than_training_set_is_clamped() {
        let x = array![[0.0], [1.0]];
        let mut model = KNearestNeighborsClassifier::new(3);
        model.fit(&x, &[1, 1]).unwrap();
        assert_eq!(model.predict(&array![[0.4]]).unwrap(), vec![1]);
    }
}
