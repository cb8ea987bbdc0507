use crate::config::ModelType;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::decision_tree::DecisionTreeClassifier;
use crate::models::knn::KNearestNeighborsClassifier;
use crate::models::naive_bayes::GaussianNBClassifier;
use crate::models::svm::SVMClassifier;

/// Build a fresh, unfitted classifier for `model_type`.
///
/// Every call returns an independent instance; nothing is shared between
/// runs.
pub fn build_model(model_type: &ModelType) -> Box<dyn ClassifierModel> {
    match model_type {
        ModelType::DecisionTree { max_depth } => Box::new(DecisionTreeClassifier::new(*max_depth)),
        ModelType::KNearestNeighbors { k } => Box::new(KNearestNeighborsClassifier::new(*k)),
        ModelType::GaussianNB { var_smoothing } => Box::new(GaussianNBClassifier::new(*var_smoothing)),
        ModelType::SVM { c, gamma, eps } => Box::new(SVMClassifier::new(*c, *gamma, *eps)),
    }
}
