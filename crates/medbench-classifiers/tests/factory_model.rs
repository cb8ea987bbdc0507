use medbench_classifiers::config::ModelType;
use medbench_classifiers::models::factory;
use ndarray::Array2;

#[test]
fn test_factory_builds_and_predicts() {
    // tiny dataset
    let x = Array2::from_shape_vec(
        (6, 2),
        vec![
            1.0, 0.0, // class 1
            0.0, 1.0, // class 0
            1.0, 0.1, // class 1
            0.0, 0.9, // class 0
            1.1, 0.0, // class 1
            0.0, 1.2, // class 0
        ],
    )
    .expect("failed to create feature matrix");
    let y = vec![1, 0, 1, 0, 1, 0];

    for model_type in ModelType::default_set() {
        let mut model = factory::build_model(&model_type);
        model.fit(&x, &y).expect("fit failed");
        let preds = model.predict(&x).expect("predict failed");
        assert_eq!(preds.len(), x.nrows());
        assert_eq!(preds, y, "{} did not fit separable data", model.name());
    }
}

#[test]
fn test_predict_before_fit_is_an_error() {
    let x = Array2::<f64>::zeros((2, 2));
    for model_type in ModelType::default_set() {
        let model = factory::build_model(&model_type);
        assert!(model.predict(&x).is_err(), "{} predicted unfitted", model_type.name());
    }
}
