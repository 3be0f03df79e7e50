use super::*;

fn separable_data() -> (Array2<f64>, Array1<f64>) {
    let x = array![[-5.0], [-4.0], [-3.0], [-2.0], [2.0], [3.0], [4.0], [5.0]];
    let y = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
    (x, y)
}

#[test]
fn test_logistic_regression_default() {
    let model = LogisticRegression::default();
    assert!(model.get_fit_intercept());
    assert_eq!(model.get_max_iterations(), 100);
    assert_abs_diff_eq!(model.get_tolerance(), 1e-4);
    assert_eq!(
        model.get_regularization_type(),
        Some(RegularizationType::L2(1.0))
    );
    assert_eq!(model.get_actual_iterations(), None);
    assert_eq!(model.get_converged(), None);
    assert_eq!(model.get_coefficients(), Err(ModelError::NotFitted));
}

#[test]
fn test_logistic_regression_new_validates_parameters() {
    assert!(LogisticRegression::new(true, 0, 1e-4, None).is_err());
    assert!(LogisticRegression::new(true, 10, 0.0, None).is_err());
    assert!(LogisticRegression::new(true, 10, f64::NAN, None).is_err());
    assert!(LogisticRegression::new(true, 10, 1e-4, Some(RegularizationType::L2(-1.0))).is_err());

    let model =
        LogisticRegression::new(false, 25, 1e-6, Some(RegularizationType::L2(0.5))).unwrap();
    assert!(!model.get_fit_intercept());
    assert_eq!(model.get_max_iterations(), 25);
}

#[test]
fn test_logistic_regression_separable_data() {
    let (x, y) = separable_data();
    let mut model = LogisticRegression::default();
    let fitted = model.fit_predict(&x, &y).unwrap();

    assert_eq!(fitted.to_vec(), vec![0, 0, 0, 0, 1, 1, 1, 1]);
    assert_eq!(model.get_converged(), Some(true));
    assert!(model.get_actual_iterations().unwrap() <= 100);
    assert!(model.get_coefficients().unwrap()[0] > 0.0);

    let probabilities = model.predict_proba(&array![[-5.0], [5.0], [15.0]]).unwrap();
    assert!(probabilities.iter().all(|&p| (0.0..=1.0).contains(&p)));
    assert!(probabilities[0] < probabilities[1]);
    assert!(probabilities[1] < probabilities[2]);
    assert!(probabilities[0] < 0.5 && probabilities[2] > 0.5);

    // predict agrees with the sign of the decision function
    let scores = model.decision_function(&x).unwrap();
    let predicted = model.predict(&x).unwrap();
    for (s, p) in scores.iter().zip(predicted.iter()) {
        assert_eq!(*p, i32::from(*s > 0.0));
    }
}

#[test]
fn test_logistic_regression_matches_unregularized_optimum() {
    // one binary feature: the unpenalized MLE reproduces the class frequencies
    let x = array![[0.0], [0.0], [0.0], [0.0], [1.0], [1.0], [1.0], [1.0]];
    let y = array![0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0];
    let mut model = LogisticRegression::new(true, 100, 1e-10, None).unwrap();
    model.fit(&x, &y).unwrap();

    let probabilities = model.predict_proba(&array![[0.0], [1.0]]).unwrap();
    assert_abs_diff_eq!(probabilities[0], 0.25, epsilon = 1e-6);
    assert_abs_diff_eq!(probabilities[1], 0.75, epsilon = 1e-6);
    assert_abs_diff_eq!(model.get_intercept().unwrap(), -(3.0f64.ln()), epsilon = 1e-6);
}

#[test]
fn test_logistic_regression_penalty_shrinks_coefficients() {
    let x = array![[0.0], [0.0], [0.0], [0.0], [1.0], [1.0], [1.0], [1.0]];
    let y = array![0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0];

    let mut free = LogisticRegression::new(true, 100, 1e-8, None).unwrap();
    free.fit(&x, &y).unwrap();
    let mut ridge =
        LogisticRegression::new(true, 100, 1e-8, Some(RegularizationType::L2(5.0))).unwrap();
    ridge.fit(&x, &y).unwrap();

    let free_coef = free.get_coefficients().unwrap()[0];
    let ridge_coef = ridge.get_coefficients().unwrap()[0];
    assert!(ridge_coef > 0.0);
    assert!(ridge_coef < free_coef);
}

#[test]
fn test_logistic_regression_penalizes_intercept() {
    // the feature carries no signal, so only the intercept moves
    let x = Array2::<f64>::zeros((4, 1));
    let y = array![1.0, 1.0, 1.0, 0.0];
    let mut model = LogisticRegression::default();
    model.fit(&x, &y).unwrap();

    let b = model.get_intercept().unwrap();
    assert_eq!(model.get_converged(), Some(true));
    assert_abs_diff_eq!(model.get_coefficients().unwrap()[0], 0.0);
    // stationary point of sum(log loss) + b^2 / 2: 4 sigmoid(b) - 3 + b = 0
    assert_abs_diff_eq!(
        4.0 * crate::math::sigmoid(b) - 3.0 + b,
        0.0,
        epsilon = 1e-3
    );
    // the unpenalized optimum would be ln 3
    assert!(b > 0.0 && b < 3.0f64.ln() - 0.5);
}

#[test]
fn test_logistic_regression_single_class() {
    let x = array![[1.0], [2.0], [3.0]];
    let y = array![0.0, 0.0, 0.0];
    let mut model = LogisticRegression::default();
    model.fit(&x, &y).unwrap();

    assert_eq!(model.get_converged(), Some(true));
    assert_eq!(model.predict(&x).unwrap().to_vec(), vec![0, 0, 0]);
}

#[test]
fn test_logistic_regression_iteration_limit_is_not_an_error() {
    let (x, y) = separable_data();
    let mut model = LogisticRegression::new(true, 1, 1e-12, None).unwrap();
    model.fit(&x, &y).unwrap();

    assert_eq!(model.get_actual_iterations(), Some(1));
    assert_eq!(model.get_converged(), Some(false));
    assert!(model.get_coefficients().is_ok());
}

#[test]
fn test_logistic_regression_errors() {
    let (x, y) = separable_data();
    let model = LogisticRegression::default();
    assert_eq!(model.predict(&x), Err(ModelError::NotFitted));

    let mut model = LogisticRegression::default();
    let bad_labels = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0];
    assert!(matches!(
        model.fit(&x, &bad_labels),
        Err(ModelError::InputValidationError(_))
    ));

    let empty = Array2::<f64>::zeros((0, 1));
    let no_labels = Array1::<f64>::zeros(0);
    assert!(matches!(
        model.fit(&empty, &no_labels),
        Err(ModelError::InputValidationError(_))
    ));

    model.fit(&x, &y).unwrap();
    assert!(matches!(
        model.predict(&array![[1.0, 2.0]]),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        model.predict(&array![[f64::INFINITY]]),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_logistic_regression_as_supervised_model() {
    let (x, y) = separable_data();
    let mut model = LogisticRegression::default();
    model.fit_model(x.view(), y.view()).unwrap();
    let predicted = model.predict_values(x.view()).unwrap();
    assert_eq!(predicted, y);
}
