pub mod decision_tree;
pub mod knn;
pub mod naive_bayes;
pub mod svm;

pub mod classifier_trait;
pub mod factory;

pub use classifier_trait::ClassifierModel;
pub use factory::build_model;
