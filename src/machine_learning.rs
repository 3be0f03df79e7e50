/// Represents the regularization applied to a linear model.
///
/// Regularization helps prevent overfitting by adding a penalty term to the model's loss function
/// during training.
///
/// # Variants
///
/// - `L2` - L2 regularization (Ridge) that adds half the sum of squared coefficients
///   multiplied by the specified strength. A fitted intercept is penalized like any coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegularizationType {
    L2(f64),
}

/// K-fold and stratified k-fold splitting plus cross-validated scoring
pub mod cross_validation;
/// This module provides helper functions for machine learning models
mod helper_function;
/// Linear regression module implementing the ordinary least squares method
pub mod linear_regression;
/// Logistic regression module for binary classification problems
pub mod logistic_regression;

pub use cross_validation::*;
pub use linear_regression::*;
pub use logistic_regression::*;
