use ahash::AHashMap;
use ndarray::{ArrayBase, Data, Ix1};

/// Computes the logistic sigmoid for a scalar input.
///
/// The sigmoid maps any real number into the open interval (0, 1). Both branches only
/// ever exponentiate a non-positive number, so extreme inputs neither overflow nor
/// produce NaN.
///
/// # Parameters
///
/// - `z` - Input value to transform
///
/// # Returns
///
/// - `f64` - Sigmoid output in the range \[0, 1\]
///
/// # Examples
/// ```rust
/// use diabetes_insight::math::sigmoid;
///
/// let value = sigmoid(0.0);
/// // sigmoid(0) = 0.5
/// assert!((value - 0.5).abs() < 1e-12);
/// assert!(sigmoid(-1000.0) >= 0.0);
/// ```
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Calculates the summed logistic regression loss (log loss) over raw logits.
///
/// Uses the stable form `max(0, x) - x*y + ln(1 + exp(-|x|))` for each sample.
///
/// # Parameters
///
/// - `logits` - Raw model outputs (before the sigmoid)
/// - `actual_labels` - Binary labels (0 or 1)
///
/// # Returns
///
/// - `f64` - Sum of the per-sample log losses
///
/// # Examples
/// ```rust
/// use diabetes_insight::math::logistic_loss;
/// use ndarray::array;
///
/// let logits = array![0.0, 2.0, -1.0];
/// let actual_labels = array![0.0, 1.0, 0.0];
/// let loss = logistic_loss(&logits, &actual_labels);
/// // ln(2) + ln(1 + e^-2) + ln(1 + e^-1) ~= 1.13334
/// assert!((loss - 1.13334).abs() < 1e-5);
/// ```
#[inline]
pub fn logistic_loss<S1, S2>(logits: &ArrayBase<S1, Ix1>, actual_labels: &ArrayBase<S2, Ix1>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    logits
        .iter()
        .zip(actual_labels.iter())
        .map(|(&x, &y)| x.max(0.0) - x * y + (-x.abs()).exp().ln_1p())
        .sum()
}

/// Calculates the sum of squared errors (SSE).
///
/// # Parameters
///
/// - `predicted` - Predicted values vector
/// - `actual` - Actual values vector
///
/// # Returns
///
/// - `f64` - Sum of squared errors computed as sum((predicted_i - actual_i)^2)
///
/// # Examples
/// ```rust
/// use diabetes_insight::math::sum_of_squared_errors;
/// use ndarray::array;
///
/// let predicted = array![2.0, 3.0];
/// let actual = array![1.0, 3.0];
/// assert!((sum_of_squared_errors(&predicted, &actual) - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn sum_of_squared_errors<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum()
}

/// Calculates the sum of absolute errors.
///
/// # Parameters
///
/// - `predicted` - Predicted values vector
/// - `actual` - Actual values vector
///
/// # Returns
///
/// - `f64` - sum(|predicted_i - actual_i|)
#[inline]
pub fn sum_of_absolute_errors<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).abs())
        .sum()
}

/// Returns a copy of the finite values, sorted ascending.
pub fn sorted_finite<'a, I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Computes the `q`-quantile of already sorted data by linear interpolation.
///
/// The position is `q * (n - 1)`; the result interpolates between the two order
/// statistics around it.
///
/// # Parameters
///
/// - `sorted` - Values sorted ascending
/// - `q` - Quantile in \[0, 1\]
///
/// # Returns
///
/// - `Some(f64)` - The interpolated quantile
/// - `None` - If `sorted` is empty or `q` lies outside \[0, 1\]
///
/// # Examples
/// ```rust
/// use diabetes_insight::math::quantile_sorted;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_sorted(&sorted, 0.5), Some(2.5));
/// assert_eq!(quantile_sorted(&sorted, 0.25), Some(1.75));
/// assert_eq!(quantile_sorted(&[], 0.5), None);
/// ```
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Median of a 1D array (0.0 for an empty array).
pub fn median<S>(values: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = f64>,
{
    quantile_sorted(&sorted_finite(values.iter()), 0.5).unwrap_or(0.0)
}

/// Finds every most-frequent value.
///
/// # Parameters
///
/// - `values` - Observations; non-finite values are ignored
///
/// # Returns
///
/// - `Vec<f64>` - All values sharing the highest count, ascending (empty for empty input)
///
/// # Examples
/// ```rust
/// use diabetes_insight::math::mode;
///
/// assert_eq!(mode(&[3.0, 1.0, 3.0, 1.0, 2.0]), vec![1.0, 3.0]);
/// assert_eq!(mode(&[5.0]), vec![5.0]);
/// ```
pub fn mode(values: &[f64]) -> Vec<f64> {
    let mut counts: AHashMap<u64, usize> = AHashMap::new();
    for &v in values.iter().filter(|v| v.is_finite()) {
        // +0.0 and -0.0 count as one value
        let key = if v == 0.0 { 0.0f64 } else { v };
        *counts.entry(key.to_bits()).or_insert(0) += 1;
    }
    let Some(&max_count) = counts.values().max() else {
        return Vec::new();
    };
    let mut modes: Vec<f64> = counts
        .into_iter()
        .filter(|&(_, count)| count == max_count)
        .map(|(bits, _)| f64::from_bits(bits))
        .collect();
    modes.sort_by(f64::total_cmp);
    modes
}
