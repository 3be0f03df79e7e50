use super::helper_function::{preliminary_check, validate_feature_count};
use crate::error::ModelError;
use crate::traits::{LinearModelGetterFunctions, SupervisedModel};
use log::debug;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

/// # Linear Regression model implementation
///
/// Ordinary least squares fitted in closed form. The features and the target are centred,
/// the normal equations `XᵀX w = Xᵀy` are solved through an SVD pseudo-inverse and the
/// intercept is recovered as `ȳ - x̄ · w`. Collinear features yield the minimum-norm
/// solution instead of an error.
///
/// ## Fields
///
/// - `coefficients` - Model coefficients (slopes), None before training
/// - `intercept` - Model intercept, None before training
/// - `fit_intercept` - Whether to include an intercept term in the model
/// - `rank` - Numerical rank of the design matrix found during the last fit
///
/// ## Examples
/// ```rust
/// use diabetes_insight::machine_learning::linear_regression::*;
/// use ndarray::{Array1, Array2, array};
///
/// // Create a linear regression model
/// let mut model = LinearRegression::default();
///
/// // y = 1 + 2 * x1 + 3 * x2
/// let x = array![[1.0, 2.0], [2.0, 1.0], [3.0, 4.0], [4.0, 3.0]];
/// let y = array![9.0, 8.0, 19.0, 18.0];
///
/// // Train the model
/// model.fit(x.view(), y.view()).unwrap();
///
/// // Make predictions
/// let new_data = Array2::from_shape_vec((1, 2), vec![0.0, 0.0]).unwrap();
/// let predictions = model.predict(new_data.view()).unwrap();
/// assert!((predictions[0] - 1.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct LinearRegression {
    /// Coefficients (slopes)
    coefficients: Option<Array1<f64>>,
    /// Intercept
    intercept: Option<f64>,
    /// Whether to fit an intercept
    fit_intercept: bool,
    /// Numerical rank of the (centred) design matrix
    rank: Option<usize>,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LinearModelGetterFunctions for LinearRegression {
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

impl LinearRegression {
    /// Creates a new, unfitted linear regression model
    ///
    /// # Parameters
    ///
    /// * `fit_intercept` - Whether to fit an intercept; when false the line passes through the origin
    pub fn new(fit_intercept: bool) -> Self {
        LinearRegression {
            coefficients: None,
            intercept: None,
            fit_intercept,
            rank: None,
        }
    }

    get_field!(get_rank, rank, Option<usize>);

    /// Fits the linear regression model
    ///
    /// # Parameters
    ///
    /// * `x` - Training data, each row is a sample, each column is a feature
    /// * `y` - Target values
    ///
    /// # Returns
    ///
    /// - `Ok(&mut self)` - Returns mutable reference to self for method chaining
    /// - `Err(ModelError::InputValidationError)` - Input does not match expectation
    /// - `Err(ModelError::ProcessingError)` - The pseudo-inverse could not be computed
    pub fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<&mut Self, ModelError> {
        preliminary_check(&x, Some(&y))?;

        let (n_samples, n_features) = x.dim();

        let (x_offset, y_offset) = if self.fit_intercept {
            (
                x.mean_axis(Axis(0))
                    .unwrap_or_else(|| Array1::zeros(n_features)),
                y.mean().unwrap_or(0.0),
            )
        } else {
            (Array1::zeros(n_features), 0.0)
        };
        let x_centered = &x - &x_offset;
        let y_centered = &y - y_offset;

        // normal equations
        let gram = x_centered.t().dot(&x_centered);
        let moment = x_centered.t().dot(&y_centered);
        let gram = DMatrix::from_fn(n_features, n_features, |i, j| gram[[i, j]]);
        let moment = DVector::from_iterator(n_features, moment.iter().copied());

        let svd = gram.svd(true, true);
        let max_singular = svd.singular_values.max();
        // singular values of XᵀX are squared, so the cutoff is sqrt(eps) relative
        let eps = max_singular * f64::EPSILON.sqrt();
        let rank = svd.rank(eps);
        let solution = svd
            .solve(&moment, eps)
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?;

        let coefficients: Array1<f64> = solution.iter().copied().collect();
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::ProcessingError(
                "Least squares solution contains NaN or infinite values".to_string(),
            ));
        }
        let intercept = if self.fit_intercept {
            y_offset - x_offset.dot(&coefficients)
        } else {
            0.0
        };

        debug!(
            "linear regression fitted on {} samples, rank {} of {}",
            n_samples, rank, n_features
        );

        self.coefficients = Some(coefficients);
        self.intercept = Some(intercept);
        self.rank = Some(rank);

        Ok(self)
    }

    /// Makes predictions using the trained model
    ///
    /// # Parameters
    ///
    /// * `x` - Prediction data, each row is a sample, each column is a feature
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - One prediction per row
    /// - `Err(ModelError::NotFitted)` - If the model has not been fitted yet
    /// - `Err(ModelError::InputValidationError)` - If number of features does not match training data
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, ModelError> {
        let (Some(coefficients), Some(intercept)) = (&self.coefficients, self.intercept) else {
            return Err(ModelError::NotFitted);
        };
        preliminary_check::<_, ndarray::ViewRepr<&f64>>(&x, None)?;
        validate_feature_count(x.ncols(), coefficients.len())?;

        Ok(x.dot(coefficients) + intercept)
    }

    /// Fits the model to the training data and then makes predictions on the same data.
    ///
    /// # Parameters
    ///
    /// * `x` - The input features matrix
    /// * `y` - The target values
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - The predicted values
    /// - `Err(ModelError)` - If fitting or prediction fails
    pub fn fit_predict(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
    ) -> Result<Array1<f64>, ModelError> {
        self.fit(x, y)?;
        self.predict(x)
    }
}

impl SupervisedModel for LinearRegression {
    fn fit_model(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<(), ModelError> {
        self.fit(x, y).map(|_| ())
    }

    fn predict_values(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, ModelError> {
        self.predict(x)
    }
}
