use anyhow::Result;
use ndarray::Array2;

/// Contract shared by the four classifier kinds.
///
/// Labels are dense class indices (`0..n_classes`) produced by
/// [`crate::labels::LabelEncoder`]. A model instance is fitted once and then
/// only used for prediction.
pub trait ClassifierModel {
    /// Fit the model on imputed training features and encoded labels.
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()>;

    /// Predict one class index per row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str { "classifier" }
}
