use super::*;

#[test]
fn test_linear_regression_default() {
    let model = LinearRegression::default();
    assert!(model.get_fit_intercept());
    assert_eq!(model.get_rank(), None);
    assert_eq!(model.get_coefficients(), Err(ModelError::NotFitted));
    assert_eq!(model.get_intercept(), Err(ModelError::NotFitted));
}

#[test]
fn test_linear_regression_exact_fit() {
    // y = 2 - x1 + 0.5 * x2
    let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 2.0], [3.0, 1.0], [2.0, 5.0]];
    let y = x.map_axis(Axis(1), |row| 2.0 - row[0] + 0.5 * row[1]);

    let mut model = LinearRegression::default();
    model.fit(x.view(), y.view()).unwrap();

    let coefficients = model.get_coefficients().unwrap();
    assert_abs_diff_eq!(coefficients[0], -1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(coefficients[1], 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(model.get_intercept().unwrap(), 2.0, epsilon = 1e-9);
    assert_eq!(model.get_rank(), Some(2));

    let predictions = model.predict(array![[10.0, 10.0]].view()).unwrap();
    assert_abs_diff_eq!(predictions[0], -3.0, epsilon = 1e-8);
}

#[test]
fn test_linear_regression_without_intercept() {
    let x = array![[1.0], [2.0], [3.0]];
    let y = array![2.0, 4.0, 6.0];
    let mut model = LinearRegression::new(false);
    model.fit(x.view(), y.view()).unwrap();

    assert_abs_diff_eq!(model.get_coefficients().unwrap()[0], 2.0, epsilon = 1e-10);
    assert_eq!(model.get_intercept(), Ok(0.0));
}

#[test]
fn test_linear_regression_collinear_and_constant_features() {
    // second column duplicates the first, third is constant
    let x = array![
        [1.0, 1.0, 7.0],
        [2.0, 2.0, 7.0],
        [3.0, 3.0, 7.0],
        [4.0, 4.0, 7.0]
    ];
    let y = array![3.0, 5.0, 7.0, 9.0];

    let mut model = LinearRegression::default();
    let fitted = model.fit_predict(x.view(), y.view()).unwrap();

    for (p, a) in fitted.iter().zip(y.iter()) {
        assert_abs_diff_eq!(p, a, epsilon = 1e-8);
    }
    assert_eq!(model.get_rank(), Some(1));

    // minimum-norm solution splits the slope evenly
    let coefficients = model.get_coefficients().unwrap();
    assert_abs_diff_eq!(coefficients[0], 1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(coefficients[1], 1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(coefficients[2], 0.0, epsilon = 1e-8);
}

#[test]
fn test_linear_regression_more_features_than_rows() {
    let x = array![[1.0, 0.0, 3.0], [0.0, 1.0, 2.0]];
    let y = array![1.0, 0.0];
    let mut model = LinearRegression::default();
    let fitted = model.fit_predict(x.view(), y.view()).unwrap();
    assert_abs_diff_eq!(fitted[0], 1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(fitted[1], 0.0, epsilon = 1e-8);
}

#[test]
fn test_linear_regression_errors() {
    let model = LinearRegression::default();
    let x = array![[1.0, 2.0]];
    assert_eq!(model.predict(x.view()), Err(ModelError::NotFitted));

    let mut model = LinearRegression::default();
    let x = array![[1.0], [2.0]];
    let y = array![1.0, 2.0, 3.0];
    assert!(matches!(
        model.fit(x.view(), y.view()),
        Err(ModelError::InputValidationError(_))
    ));

    let y = array![1.0, f64::NAN];
    assert!(matches!(
        model.fit(x.view(), y.view()),
        Err(ModelError::InputValidationError(_))
    ));

    let y = array![1.0, 2.0];
    model.fit(x.view(), y.view()).unwrap();
    assert!(matches!(
        model.predict(array![[1.0, 2.0]].view()),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_linear_regression_as_supervised_model() {
    let x = array![[0.0], [1.0], [2.0]];
    let y = array![1.0, 3.0, 5.0];
    let mut model = LinearRegression::default();
    model.fit_model(x.view(), y.view()).unwrap();
    let predicted = model.predict_values(array![[3.0]].view()).unwrap();
    assert_abs_diff_eq!(predicted[0], 7.0, epsilon = 1e-9);
}
