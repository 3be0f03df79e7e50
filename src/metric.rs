use crate::error::MetricError;
use crate::math::{median, sum_of_absolute_errors, sum_of_squared_errors};
use ndarray::prelude::*;
use ndarray::Data;
use std::fmt;

/// Checks that both arrays are non-empty and of equal length
fn check_lengths<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> Result<usize, MetricError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if predicted.len() != actual.len() {
        return Err(MetricError::LengthMismatch {
            predicted: predicted.len(),
            actual: actual.len(),
        });
    }
    if predicted.is_empty() {
        return Err(MetricError::Empty);
    }
    Ok(predicted.len())
}

/// Divides, failing instead of producing NaN or infinity when the denominator is zero
fn ratio(numerator: f64, denominator: f64, metric: &'static str) -> Result<f64, MetricError> {
    if denominator == 0.0 {
        return Err(MetricError::ZeroDivision { metric });
    }
    Ok(numerator / denominator)
}

/// Calculates the Mean Squared Error between predicted and actual values.
///
/// # Parameters
///
/// - `predicted` - Predicted values for each sample
/// - `actual` - Ground-truth values for each sample
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use diabetes_insight::metric::mean_squared_error;
///
/// let actual = array![3.0, -0.5, 2.0, 7.0];
/// let predicted = array![2.5, 0.0, 2.1, 7.8];
/// let mse = mean_squared_error(&predicted, &actual).unwrap();
/// // MSE = (0.25 + 0.25 + 0.01 + 0.64) / 4 = 0.2875
/// assert!((mse - 0.2875).abs() < 1e-10);
/// ```
///
/// # Returns
///
/// - `Ok(f64)` - Mean squared error
/// - `Err(MetricError)` - If the arrays are empty or of different lengths
pub fn mean_squared_error<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> Result<f64, MetricError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    let n = check_lengths(predicted, actual)?;
    Ok(sum_of_squared_errors(predicted, actual) / n as f64)
}

/// Calculates the Root Mean Squared Error (RMSE) between predicted and actual values.
///
/// RMSE is the square root of the Mean Squared Error, giving a metric in the same units as the original data.
///
/// # Returns
///
/// - `Ok(f64)` - Root mean squared error
/// - `Err(MetricError)` - If the arrays are empty or of different lengths
pub fn root_mean_squared_error<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> Result<f64, MetricError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    mean_squared_error(predicted, actual).map(f64::sqrt)
}

/// Calculates the Mean Absolute Error (MAE) between predicted and actual values.
///
/// # Examples
/// ```rust
/// use diabetes_insight::metric::mean_absolute_error;
/// use ndarray::array;
///
/// let predicted = array![2.0, 0.0, 4.0];
/// let actual = array![1.0, 0.0, 2.0];
/// assert_eq!(mean_absolute_error(&predicted, &actual).unwrap(), 1.0);
/// ```
///
/// # Returns
///
/// - `Ok(f64)` - Mean absolute error
/// - `Err(MetricError)` - If the arrays are empty or of different lengths
pub fn mean_absolute_error<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> Result<f64, MetricError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    let n = check_lengths(predicted, actual)?;
    Ok(sum_of_absolute_errors(predicted, actual) / n as f64)
}

/// Calculates the D² absolute error score.
///
/// The fraction of absolute deviation explained by the predictions, relative to always
/// predicting the median of `actual`:
///
/// D² = 1 - Σ|actual - predicted| / Σ|actual - median(actual)|
///
/// When `actual` is constant the denominator is zero; the score is then 1.0 for a
/// perfect prediction and 0.0 otherwise.
///
/// # Examples
/// ```rust
/// use diabetes_insight::metric::d2_absolute_error_score;
/// use ndarray::array;
///
/// let actual = array![1.0, 2.0, 3.0];
/// // predicting the median everywhere scores 0
/// let baseline = array![2.0, 2.0, 2.0];
/// assert_eq!(d2_absolute_error_score(&baseline, &actual).unwrap(), 0.0);
/// assert_eq!(d2_absolute_error_score(&actual, &actual).unwrap(), 1.0);
/// ```
///
/// # Returns
///
/// - `Ok(f64)` - Score, at most 1.0 and possibly negative
/// - `Err(MetricError)` - If the arrays are empty or of different lengths
pub fn d2_absolute_error_score<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> Result<f64, MetricError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    check_lengths(predicted, actual)?;

    let numerator = sum_of_absolute_errors(predicted, actual);
    let center = median(actual);
    let denominator: f64 = actual.iter().map(|a| (a - center).abs()).sum();

    if denominator == 0.0 {
        return Ok(if numerator == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - numerator / denominator)
}

/// Calculate the accuracy of a classification model.
///
/// Accuracy is the proportion of samples whose predicted label equals the actual label.
///
/// # Examples
/// ```rust
/// use diabetes_insight::metric::accuracy_score;
/// use ndarray::array;
///
/// let predicted = array![0.0, 1.0, 1.0];
/// let actual = array![0.0, 0.0, 1.0];
/// let acc = accuracy_score(&predicted, &actual).unwrap();
/// assert!((acc - 0.6666666666666667).abs() < 1e-6);
/// ```
///
/// # Returns
///
/// - `Ok(f64)` - Accuracy in the range \[0.0, 1.0\]
/// - `Err(MetricError)` - If the arrays are empty or of different lengths
pub fn accuracy_score<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> Result<f64, MetricError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    let n = check_lengths(predicted, actual)?;
    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();
    Ok(correct as f64 / n as f64)
}

/// Confusion Matrix for binary classification evaluation.
///
/// Counts how predicted labels line up with actual labels. The positive class is 1.
///
/// # Fields
///
/// - `tp` - True Positive count
/// - `fp` - False Positive count
/// - `tn` - True Negative count
/// - `fn_` - False Negative count
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use diabetes_insight::metric::ConfusionMatrix;
///
/// let predicted = array![1.0, 0.0, 1.0, 0.0, 1.0];
/// let actual = array![1.0, 0.0, 0.0, 1.0, 1.0];
///
/// let cm = ConfusionMatrix::new(&predicted, &actual).unwrap();
/// assert_eq!(cm.get_counts(), (2, 1, 1, 1));
/// assert_eq!(cm.as_array(), [[1, 1], [1, 2]]);
/// assert!((cm.accuracy().unwrap() - 0.6).abs() < 1e-12);
/// println!("{}", cm.summary());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    tp: usize,
    fp: usize,
    tn: usize,
    fn_: usize,
}

impl ConfusionMatrix {
    /// Create a new confusion matrix.
    ///
    /// # Parameters
    ///
    /// - `predicted` - Predicted labels, each 0.0 or 1.0
    /// - `actual` - Ground-truth labels, each 0.0 or 1.0
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - Confusion matrix with populated counts
    /// - `Err(MetricError::NonBinaryLabel)` - If any label is neither 0 nor 1
    /// - `Err(MetricError)` - If the arrays are empty or of different lengths
    pub fn new<S1, S2>(
        predicted: &ArrayBase<S1, Ix1>,
        actual: &ArrayBase<S2, Ix1>,
    ) -> Result<Self, MetricError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        check_lengths(predicted, actual)?;

        let mut matrix = ConfusionMatrix::from_counts(0, 0, 0, 0);
        for (&p, &a) in predicted.iter().zip(actual.iter()) {
            let p_positive = as_binary(p)?;
            let a_positive = as_binary(a)?;
            match (p_positive, a_positive) {
                (true, true) => matrix.tp += 1,
                (true, false) => matrix.fp += 1,
                (false, true) => matrix.fn_ += 1,
                (false, false) => matrix.tn += 1,
            }
        }

        Ok(matrix)
    }

    /// Builds a matrix from already known counts
    pub fn from_counts(tp: usize, fp: usize, tn: usize, fn_: usize) -> Self {
        ConfusionMatrix { tp, fp, tn, fn_ }
    }

    /// Get the components of the confusion matrix.
    ///
    /// # Returns
    ///
    /// - `(usize, usize, usize, usize)` - Tuple of (tp, fp, tn, fn) counts
    pub fn get_counts(&self) -> (usize, usize, usize, usize) {
        (self.tp, self.fp, self.tn, self.fn_)
    }

    /// Number of samples counted
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// Counts laid out with actual classes as rows and predicted classes as columns,
    /// negative class first: `[[TN, FP], [FN, TP]]`
    pub fn as_array(&self) -> [[usize; 2]; 2] {
        [[self.tn, self.fp], [self.fn_, self.tp]]
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN).
    pub fn accuracy(&self) -> Result<f64, MetricError> {
        ratio(
            (self.tp + self.tn) as f64,
            self.total() as f64,
            "accuracy",
        )
    }

    /// Calculate precision: TP / (TP + FP).
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - Precision in the range \[0.0, 1.0\]
    /// - `Err(MetricError::ZeroDivision)` - If nothing was predicted positive
    pub fn precision(&self) -> Result<f64, MetricError> {
        ratio(self.tp as f64, (self.tp + self.fp) as f64, "precision")
    }

    /// Calculate recall (sensitivity): TP / (TP + FN).
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - Recall in the range \[0.0, 1.0\]
    /// - `Err(MetricError::ZeroDivision)` - If there are no actual positives
    pub fn recall(&self) -> Result<f64, MetricError> {
        ratio(self.tp as f64, (self.tp + self.fn_) as f64, "sensitivity")
    }

    /// Same as [`ConfusionMatrix::recall`]
    pub fn sensitivity(&self) -> Result<f64, MetricError> {
        self.recall()
    }

    /// Calculate specificity: TN / (TN + FP).
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - Specificity in the range \[0.0, 1.0\]
    /// - `Err(MetricError::ZeroDivision)` - If there are no actual negatives
    pub fn specificity(&self) -> Result<f64, MetricError> {
        ratio(self.tn as f64, (self.tn + self.fp) as f64, "specificity")
    }

    /// Calculate F1 score: 2 * (Precision * Recall) / (Precision + Recall).
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - F1 score in the range \[0.0, 1.0\]
    /// - `Err(MetricError::ZeroDivision)` - If precision or recall is undefined, or both are 0
    pub fn f1_score(&self) -> Result<f64, MetricError> {
        let precision = self.precision()?;
        let recall = self.recall()?;
        ratio(
            2.0 * (precision * recall),
            precision + recall,
            "F1 score",
        )
    }

    /// All derived metrics at once
    pub fn metrics(&self) -> ClassificationMetrics {
        ClassificationMetrics {
            accuracy: self.accuracy(),
            sensitivity: self.sensitivity(),
            precision: self.precision(),
            specificity: self.specificity(),
            f1_score: self.f1_score(),
        }
    }

    /// Generate a formatted summary of the confusion matrix and derived metrics.
    ///
    /// # Returns
    ///
    /// - `String` - Text summary containing matrix counts and metrics with four decimal places
    pub fn summary(&self) -> String {
        format!(
            "Confusion matrix\n\n\
             [[{} {}]\n \
             [{} {}]]\n\n\
             True Positives(TP) =  {}\n\n\
             True Negatives(TN) =  {}\n\n\
             False Positives(FP) =  {}\n\n\
             False Negatives(FN) =  {}",
            self.tn, self.fp, self.fn_, self.tp, self.tp, self.tn, self.fp, self.fn_
        )
    }
}

fn as_binary(label: f64) -> Result<bool, MetricError> {
    if label == 1.0 {
        Ok(true)
    } else if label == 0.0 {
        Ok(false)
    } else {
        Err(MetricError::NonBinaryLabel(label))
    }
}

/// Scalar metrics derived from a [`ConfusionMatrix`]; each one is undefined on its own
/// when its denominator is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationMetrics {
    pub accuracy: Result<f64, MetricError>,
    pub sensitivity: Result<f64, MetricError>,
    pub precision: Result<f64, MetricError>,
    pub specificity: Result<f64, MetricError>,
    pub f1_score: Result<f64, MetricError>,
}

/// Renders a metric with four decimals, or `undefined (<reason>)`
pub struct MetricDisplay<'a>(pub &'a Result<f64, MetricError>);

impl fmt::Display for MetricDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(value) => write!(f, "{:.4}", value),
            Err(e) => write!(f, "undefined ({})", e),
        }
    }
}

impl fmt::Display for ClassificationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy : {}", MetricDisplay(&self.accuracy))?;
        writeln!(f, "Sensitivity : {}", MetricDisplay(&self.sensitivity))?;
        writeln!(f, "Precision : {}", MetricDisplay(&self.precision))?;
        writeln!(f, "Specificity : {}", MetricDisplay(&self.specificity))?;
        writeln!(f, "F1 Score : {}", MetricDisplay(&self.f1_score))
    }
}
