use crate::error::ModelError;
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Common interface of the estimators that cross-validation can refit on each fold
///
/// Implementors fit on a feature matrix and a target vector, then predict one value per
/// row: a class label (0.0 or 1.0) for classifiers, a continuous value for regressors.
pub trait SupervisedModel {
    /// Fits the model on `x` and `y`, replacing any previous fit
    ///
    /// # Parameters
    ///
    /// * `x` - Feature matrix, one row per sample
    /// * `y` - Target values aligned with the rows of `x`
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the model was fitted
    /// - `Err(ModelError)` - If the input is invalid or the solver fails
    fn fit_model(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<(), ModelError>;

    /// Predicts one value per row of `x`
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - Predictions aligned with the rows of `x`
    /// - `Err(ModelError::NotFitted)` - If the model has not been fitted yet
    fn predict_values(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, ModelError>;
}

/// Getters shared by the linear models
pub trait LinearModelGetterFunctions {
    /// Gets the current setting for fitting the intercept term
    ///
    /// # Returns
    ///
    /// * `bool` - Returns `true` if the model includes an intercept term, `false` otherwise
    fn get_fit_intercept(&self) -> bool;

    /// Returns the fitted coefficients, one per feature
    ///
    /// # Returns
    ///
    /// - `Ok(&Array1<f64>)` - The coefficients if the model has been fitted
    /// - `Err(ModelError::NotFitted)` - If the model has not been fitted yet
    fn get_coefficients(&self) -> Result<&Array1<f64>, ModelError>;

    /// Returns the fitted intercept (0.0 when no intercept is fitted)
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - The intercept if the model has been fitted
    /// - `Err(ModelError::NotFitted)` - If the model has not been fitted yet
    fn get_intercept(&self) -> Result<f64, ModelError>;
}
