pub use super::RegularizationType;
use super::helper_function::{
    preliminary_check, solve_symmetric, validate_binary_target, validate_feature_count,
    validate_max_iterations, validate_regulation_type, validate_tolerance, with_bias_column,
};
use crate::error::ModelError;
use crate::math::{logistic_loss, sigmoid};
use crate::traits::{LinearModelGetterFunctions, SupervisedModel};
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1, Ix2};

/// Default inverse regularization strength `C`; the L2 penalty strength is `1 / C`
pub const DEFAULT_INVERSE_REGULARIZATION: f64 = 1.0;

/// Sufficient-decrease constant of the backtracking line search
const ARMIJO_C: f64 = 1e-4;

/// Smallest step the line search tries before giving up on the direction
const MIN_STEP: f64 = 1e-10;

/// Logistic Regression model implementation
///
/// Binary classifier minimizing the summed log loss plus an optional L2 penalty
/// `alpha / 2 * ||w||^2`, where `w` holds the coefficients and the intercept. Penalizing
/// the intercept treats it as a constant feature of value 1. The objective is
/// minimized with Newton's method (iteratively reweighted least squares) and a
/// backtracking line search, so the fitted model only depends on the data.
///
/// # Fields
///
/// - `coefficients` - One weight per feature, None before training
/// - `intercept` - Bias term, None before training
/// - `fit_intercept` - Whether to use intercept term (bias)
/// - `max_iter` - Maximum number of Newton iterations
/// - `tol` - Convergence tolerance on the gradient norm, relative to the initial gradient norm
/// - `n_iter` - Actual number of iterations the algorithm ran for after fitting, None before training
/// - `converged` - Whether the last fit met the tolerance, None before training
/// - `regularization_type` - Regularization type and strength
///
/// # Examples
/// ```rust
/// use diabetes_insight::machine_learning::logistic_regression::LogisticRegression;
/// use ndarray::{Array1, Array2};
///
/// // Create a logistic regression model
/// let mut model = LogisticRegression::default();
///
/// // One feature; small values are class 0, large values class 1
/// let x_train = Array2::from_shape_vec((6, 1), vec![0.0, 1.0, 2.0, 8.0, 9.0, 10.0]).unwrap();
/// let y_train = Array1::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
///
/// // Train the model
/// model.fit(&x_train, &y_train).unwrap();
/// assert!(model.get_converged().unwrap());
///
/// // Make predictions
/// let x_test = Array2::from_shape_vec((2, 1), vec![0.5, 9.5]).unwrap();
/// let predictions = model.predict(&x_test).unwrap();
/// assert_eq!(predictions.to_vec(), vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coefficients: Option<Array1<f64>>,
    intercept: Option<f64>,
    fit_intercept: bool,
    max_iter: usize,
    tol: f64,
    n_iter: Option<usize>,
    converged: Option<bool>,
    regularization_type: Option<RegularizationType>,
}

impl Default for LogisticRegression {
    /// Creates a logistic regression model with default parameters.
    ///
    /// # Default Values
    ///
    /// - `fit_intercept`: `true` - Include a bias/intercept term in the model
    /// - `max_iter`: `100` - Maximum number of Newton iterations
    /// - `tol`: `1e-4` - Training stops once the gradient norm falls below `tol` times the initial gradient norm (at least `tol`)
    /// - `regularization_type`: `L2(1.0)` - Ridge penalty of strength `1 / C` with `C = 1`
    ///
    /// # Returns
    ///
    /// * `Self` - A new `LogisticRegression` instance with default configuration
    fn default() -> Self {
        LogisticRegression {
            coefficients: None,
            intercept: None,
            fit_intercept: true,
            max_iter: 100,
            tol: 1e-4,
            n_iter: None,
            converged: None,
            regularization_type: Some(RegularizationType::L2(
                1.0 / DEFAULT_INVERSE_REGULARIZATION,
            )),
        }
    }
}

impl LinearModelGetterFunctions for LogisticRegression {
    fn get_fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    fn get_coefficients(&self) -> Result<&Array1<f64>, ModelError> {
        self.coefficients.as_ref().ok_or(ModelError::NotFitted)
    }

    fn get_intercept(&self) -> Result<f64, ModelError> {
        self.intercept.ok_or(ModelError::NotFitted)
    }
}

impl LogisticRegression {
    /// Creates a new logistic regression model with specified parameters
    ///
    /// # Parameters
    ///
    /// - `fit_intercept` - Whether to add intercept term (bias)
    /// - `max_iterations` - Maximum number of Newton iterations, must be greater than 0
    /// - `tolerance` - Relative gradient-norm tolerance, must be positive and finite
    /// - `regularization_type` - Optional L2 penalty. Alpha must be non-negative and finite
    ///
    /// # Returns
    ///
    /// - `Result<Self, ModelError>` - An untrained logistic regression model instance or validation error
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If any parameter is invalid
    pub fn new(
        fit_intercept: bool,
        max_iterations: usize,
        tolerance: f64,
        regularization_type: Option<RegularizationType>,
    ) -> Result<Self, ModelError> {
        validate_max_iterations(max_iterations)?;
        validate_tolerance(tolerance)?;
        validate_regulation_type(regularization_type)?;

        Ok(LogisticRegression {
            coefficients: None,
            intercept: None,
            fit_intercept,
            max_iter: max_iterations,
            tol: tolerance,
            n_iter: None,
            converged: None,
            regularization_type,
        })
    }

    // Getters
    get_field!(get_max_iterations, max_iter, usize);
    get_field!(get_tolerance, tol, f64);
    get_field!(get_actual_iterations, n_iter, Option<usize>);
    get_field!(get_converged, converged, Option<bool>);
    get_field!(
        get_regularization_type,
        regularization_type,
        Option<RegularizationType>
    );

    fn alpha(&self) -> f64 {
        match self.regularization_type {
            Some(RegularizationType::L2(alpha)) => alpha,
            None => 0.0,
        }
    }

    /// Penalized objective at `weights`, where `weights[0]` is the intercept when one is fitted
    fn objective(&self, x: &Array2<f64>, y: &Array1<f64>, weights: &Array1<f64>) -> f64 {
        let penalty = weights.dot(weights);
        logistic_loss(&x.dot(weights), y) + 0.5 * self.alpha() * penalty
    }

    /// Trains the logistic regression model
    ///
    /// Runs Newton iterations on the penalized log loss. Each step solves
    /// `H d = -g` and is shortened until the objective decreases sufficiently.
    /// Hitting `max_iter` without meeting the tolerance is not an error: the last
    /// iterate is kept, `get_converged` returns `Some(false)` and a warning is logged.
    ///
    /// # Parameters
    ///
    /// - `x` - Feature matrix where each row is a sample and each column is a feature
    /// - `y` - Target variable containing 0 or 1 indicating sample class
    ///
    /// # Returns
    ///
    /// - `Result<&mut Self, ModelError>` - A mutable reference to the trained model or error
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If inputs are empty, misaligned, non-finite, or the target is not binary
    /// - `ModelError::ProcessingError` - If numerical issues (NaN/Infinity, singular Hessian) occur during training
    pub fn fit<S1, S2>(
        &mut self,
        x: &ArrayBase<S1, Ix2>,
        y: &ArrayBase<S2, Ix1>,
    ) -> Result<&mut Self, ModelError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        preliminary_check(x, Some(y))?;
        validate_binary_target(y)?;

        let x_train = if self.fit_intercept {
            with_bias_column(x)
        } else {
            x.to_owned()
        };
        let y = y.to_owned();
        let n_params = x_train.ncols();
        let alpha = self.alpha();

        let mut weights = Array1::<f64>::zeros(n_params);
        let mut cost = self.objective(&x_train, &y, &weights);
        let mut threshold = None;
        let mut converged = false;
        let mut n_iter = 0;

        while n_iter < self.max_iter {
            let probabilities = x_train.dot(&weights).mapv(sigmoid);

            // gradient of the penalized loss
            let gradient = x_train.t().dot(&(&probabilities - &y)) + &weights * alpha;
            if gradient.iter().any(|g| !g.is_finite()) {
                return Err(ModelError::ProcessingError(
                    "Gradient calculation resulted in NaN or infinite values".to_string(),
                ));
            }

            let gradient_norm = gradient.dot(&gradient).sqrt();
            let limit = *threshold.get_or_insert(self.tol * gradient_norm.max(1.0));
            if gradient_norm <= limit {
                converged = true;
                break;
            }
            n_iter += 1;

            // Hessian: X^T diag(p(1-p)) X + alpha I
            let curvature = probabilities.mapv(|p| p * (1.0 - p));
            let weighted = &x_train * &curvature.insert_axis(Axis(1));
            let mut hessian = x_train.t().dot(&weighted);
            for i in 0..n_params {
                hessian[[i, i]] += alpha;
            }

            let direction = solve_symmetric(&hessian, &gradient.mapv(|g| -g))?;
            let slope = gradient.dot(&direction);

            let mut step = 1.0;
            let mut candidate = &weights + &direction;
            let mut candidate_cost = self.objective(&x_train, &y, &candidate);
            while !(candidate_cost <= cost + ARMIJO_C * step * slope) && step > MIN_STEP {
                step *= 0.5;
                candidate = &weights + &(&direction * step);
                candidate_cost = self.objective(&x_train, &y, &candidate);
            }
            if !candidate_cost.is_finite() {
                return Err(ModelError::ProcessingError(
                    "Cost calculation resulted in NaN or infinite value".to_string(),
                ));
            }
            debug!(
                "logistic regression iteration {}: cost {:.6}, gradient norm {:.3e}, step {}",
                n_iter, candidate_cost, gradient_norm, step
            );

            let stalled = step <= MIN_STEP;
            weights = candidate;
            cost = candidate_cost;
            if stalled {
                break;
            }
        }

        if !converged {
            warn!(
                "logistic regression did not converge within {} iterations; using the last iterate",
                self.max_iter
            );
        }

        let (intercept, coefficients) = if self.fit_intercept {
            (weights[0], weights.slice(ndarray::s![1..]).to_owned())
        } else {
            (0.0, weights)
        };
        self.coefficients = Some(coefficients);
        self.intercept = Some(intercept);
        self.n_iter = Some(n_iter);
        self.converged = Some(converged);

        Ok(self)
    }

    /// Computes the raw linear score `x · coefficients + intercept` of every sample
    ///
    /// # Errors
    ///
    /// - `ModelError::NotFitted` - If the model has not been fitted yet
    /// - `ModelError::InputValidationError` - If input is empty, dimensions mismatch, or contains invalid values
    pub fn decision_function<S>(&self, x: &ArrayBase<S, Ix2>) -> Result<Array1<f64>, ModelError>
    where
        S: Data<Elem = f64>,
    {
        let (Some(coefficients), Some(intercept)) = (&self.coefficients, self.intercept) else {
            return Err(ModelError::NotFitted);
        };
        preliminary_check::<S, S>(x, None)?;
        validate_feature_count(x.ncols(), coefficients.len())?;

        Ok(x.dot(coefficients) + intercept)
    }

    /// Predicts class labels for samples
    ///
    /// A sample is labelled 1 when its positive-class probability exceeds 0.5.
    ///
    /// # Parameters
    ///
    /// - `x` - Feature matrix where each row is a sample and each column is a feature
    ///
    /// # Returns
    ///
    /// - `Result<Array1<i32>, ModelError>` - A 1D array containing predicted class labels (0 or 1)
    ///
    /// # Errors
    ///
    /// - `ModelError::NotFitted` - If the model has not been fitted yet
    /// - `ModelError::InputValidationError` - If input is empty, dimensions mismatch, or contains invalid values
    pub fn predict<S>(&self, x: &ArrayBase<S, Ix2>) -> Result<Array1<i32>, ModelError>
    where
        S: Data<Elem = f64>,
    {
        let scores = self.decision_function(x)?;
        Ok(scores.mapv(|z| if z > 0.0 { 1 } else { 0 }))
    }

    /// Predicts probability scores for samples
    ///
    /// Uses the sigmoid function to convert linear predictions to probabilities between 0-1.
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - The probability of each sample belonging to the positive class
    /// - `Err(ModelError)` - Same conditions as [`LogisticRegression::predict`]
    pub fn predict_proba<S>(&self, x: &ArrayBase<S, Ix2>) -> Result<Array1<f64>, ModelError>
    where
        S: Data<Elem = f64>,
    {
        Ok(self.decision_function(x)?.mapv(sigmoid))
    }

    /// Fits the logistic regression model to the training data and then makes predictions.
    ///
    /// This is a convenience method that combines `fit` and `predict` operations in a single call.
    ///
    /// # Parameters
    ///
    /// - `train_x` - Training features as a 2D array
    /// - `train_y` - Target values as a 1D array corresponding to the training samples
    ///
    /// # Returns
    ///
    /// - `Result<Array1<i32>, ModelError>` - Predicted class labels for the training samples
    pub fn fit_predict<S1, S2>(
        &mut self,
        train_x: &ArrayBase<S1, Ix2>,
        train_y: &ArrayBase<S2, Ix1>,
    ) -> Result<Array1<i32>, ModelError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        self.fit(train_x, train_y)?;
        self.predict(train_x)
    }
}

impl SupervisedModel for LogisticRegression {
    fn fit_model(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<(), ModelError> {
        self.fit(&x, &y).map(|_| ())
    }

    fn predict_values(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, ModelError> {
        Ok(self.predict(&x)?.mapv(f64::from))
    }
}
