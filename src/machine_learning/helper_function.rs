use super::RegularizationType;
use crate::error::ModelError;
use log::warn;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2};

/// Performs validation checks on the input data matrices.
///
/// This function validates that:
/// - The input data matrix is not empty
/// - The input data does not contain NaN or infinite values
/// - When a target vector is provided:
///   - The target vector is not empty
///   - The target vector length matches the number of rows in the input data
///   - The target vector does not contain NaN or infinite values
///
/// # Parameters
///
/// - `x` - A 2D array of feature values where rows represent samples and columns represent features
/// - `y` - An optional 1D array representing the target variables or labels corresponding to each sample
///
/// # Returns
///
/// - `Ok(())` - If all validation checks pass
/// - `Err(ModelError::InputValidationError)` - If any validation check fails, with an informative error message
pub fn preliminary_check<S1, S2>(
    x: &ArrayBase<S1, Ix2>,
    y: Option<&ArrayBase<S2, Ix1>>,
) -> Result<(), ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if x.nrows() == 0 {
        return Err(ModelError::InputValidationError(
            "Input data is empty".to_string(),
        ));
    }

    for (i, row) in x.outer_iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            if !val.is_finite() {
                return Err(ModelError::InputValidationError(format!(
                    "Input data contains NaN or infinite value at position [{}][{}]",
                    i, j
                )));
            }
        }
    }

    if let Some(y) = y {
        if y.is_empty() {
            return Err(ModelError::InputValidationError(
                "Target vector is empty".to_string(),
            ));
        }

        if y.len() != x.nrows() {
            return Err(ModelError::InputValidationError(format!(
                "Input data and target vector have different lengths, x rows: {}, y length: {}",
                x.nrows(),
                y.len()
            )));
        }

        if y.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::InputValidationError(
                "Target vector contains NaN or infinite values".to_string(),
            ));
        }
    }
    Ok(())
}

/// Checks that every target value is 0.0 or 1.0.
pub fn validate_binary_target<S>(y: &ArrayBase<S, Ix1>) -> Result<(), ModelError>
where
    S: Data<Elem = f64>,
{
    if let Some(val) = y.iter().find(|&&v| v != 0.0 && v != 1.0) {
        return Err(ModelError::InputValidationError(format!(
            "Target vector must contain only 0 or 1, got {}",
            val
        )));
    }
    Ok(())
}

/// Checks that a prediction input has the number of features seen during fit.
pub fn validate_feature_count(n_features: usize, expected: usize) -> Result<(), ModelError> {
    if n_features != expected {
        return Err(ModelError::InputValidationError(format!(
            "Number of features does not match training data, x columns: {}, expected: {}",
            n_features, expected
        )));
    }
    Ok(())
}

/// Validates that the maximum iterations parameter is greater than zero.
///
/// # Parameters
///
/// * `max_iterations` - The maximum number of iterations to validate
///
/// # Returns
///
/// - `Ok(())` - If the maximum iterations value is valid (greater than 0)
/// - `Err(ModelError::InputValidationError)` - If the maximum iterations value is 0
pub fn validate_max_iterations(max_iterations: usize) -> Result<(), ModelError> {
    if max_iterations == 0 {
        return Err(ModelError::InputValidationError(
            "max_iterations must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates that the tolerance parameter is positive and finite.
///
/// # Parameters
///
/// * `tolerance` - The convergence tolerance value to validate
///
/// # Returns
///
/// - `Ok(())` - If the tolerance is valid (positive and finite)
/// - `Err(ModelError::InputValidationError)` - If the tolerance is invalid (non-positive, NaN, or infinite)
pub fn validate_tolerance(tolerance: f64) -> Result<(), ModelError> {
    if tolerance <= 0.0 || !tolerance.is_finite() {
        return Err(ModelError::InputValidationError(format!(
            "tolerance must be positive and finite, got {}",
            tolerance
        )));
    }

    Ok(())
}

/// Validates the regularization type and its associated parameters.
///
/// The strength must be non-negative and finite. A strength of 0 is accepted but logged,
/// since `None` expresses the same model.
///
/// # Parameters
///
/// * `reg_type` - An optional regularization type with its strength parameter
///
/// # Returns
///
/// - `Ok(())` - If the regularization configuration is valid
/// - `Err(ModelError::InputValidationError)` - If the regularization alpha is negative, NaN, or infinite
pub fn validate_regulation_type(reg_type: Option<RegularizationType>) -> Result<(), ModelError> {
    if let Some(RegularizationType::L2(alpha)) = reg_type {
        if alpha < 0.0 || !alpha.is_finite() {
            return Err(ModelError::InputValidationError(format!(
                "Regularization alpha must be non-negative and finite, got {}",
                alpha
            )));
        }
        if alpha == 0.0 {
            warn!("regularization alpha is 0, consider using None instead");
        }
    }

    Ok(())
}

/// Prepends a column of ones to `x`.
pub fn with_bias_column<S>(x: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let (n_samples, n_features) = x.dim();
    let mut x_with_bias = Array2::ones((n_samples, n_features + 1));
    x_with_bias
        .slice_mut(ndarray::s![.., 1..])
        .assign(x);
    x_with_bias
}

/// Relative size of the ridge added to a matrix whose Cholesky factorization failed
const SOLVE_JITTER: f64 = 1e-10;

/// Solves the symmetric system `a * v = b`.
///
/// Tries a Cholesky factorization first, then LU, then LU on `a` with a small ridge
/// on the diagonal.
///
/// # Returns
///
/// - `Ok(Array1<f64>)` - The solution vector
/// - `Err(ModelError::ProcessingError)` - If every factorization fails
pub fn solve_symmetric(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, ModelError> {
    let n = b.len();
    let matrix = DMatrix::from_fn(n, n, |i, j| a[[i, j]]);
    let rhs = DVector::from_iterator(n, b.iter().copied());

    let solution = match matrix.clone().cholesky() {
        Some(cholesky) => Some(cholesky.solve(&rhs)),
        None => matrix.clone().lu().solve(&rhs).or_else(|| {
            let scale = matrix.diagonal().amax().max(1.0);
            let ridged = matrix + DMatrix::identity(n, n) * (scale * SOLVE_JITTER);
            ridged.lu().solve(&rhs)
        }),
    };

    match solution {
        Some(v) if v.iter().all(|x| x.is_finite()) => Ok(v.iter().copied().collect()),
        _ => Err(ModelError::ProcessingError(
            "Linear system could not be solved, the matrix is singular".to_string(),
        )),
    }
}
