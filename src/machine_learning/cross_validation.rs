use crate::error::{MetricError, ModelError};
use crate::metric::{accuracy_score, d2_absolute_error_score};
use crate::traits::SupervisedModel;
use ahash::AHashMap;
use log::{debug, warn};
use ndarray::{ArrayView1, ArrayView2, Axis};

/// How rows are assigned to folds. Neither strategy shuffles: folds follow row order.
///
/// # Variants
///
/// - `KFold` - Consecutive blocks; the first `n % n_splits` folds get one extra row
/// - `StratifiedKFold` - Each fold keeps roughly the class proportions of the labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CVStrategy {
    KFold { n_splits: usize },
    StratifiedKFold { n_splits: usize },
}

/// A single train/test split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CVSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fold_idx: usize,
}

/// Metric used to score each held-out fold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoring {
    Accuracy,
    D2AbsoluteError,
}

impl Scoring {
    fn score(self, predicted: ArrayView1<f64>, actual: ArrayView1<f64>) -> Result<f64, MetricError> {
        match self {
            Scoring::Accuracy => accuracy_score(&predicted, &actual),
            Scoring::D2AbsoluteError => d2_absolute_error_score(&predicted, &actual),
        }
    }
}

fn validate_n_splits(n_samples: usize, n_splits: usize) -> Result<(), ModelError> {
    if n_splits < 2 {
        return Err(ModelError::InputValidationError(format!(
            "n_splits must be at least 2, got {}",
            n_splits
        )));
    }
    if n_samples < n_splits {
        return Err(ModelError::InputValidationError(format!(
            "n_samples ({}) must be >= n_splits ({})",
            n_samples, n_splits
        )));
    }
    Ok(())
}

/// Builds the splits from a fold id per row.
fn splits_from_folds(test_folds: &[usize], n_splits: usize) -> Vec<CVSplit> {
    (0..n_splits)
        .map(|fold_idx| {
            let (test_indices, train_indices): (Vec<usize>, Vec<usize>) =
                (0..test_folds.len()).partition(|&i| test_folds[i] == fold_idx);
            CVSplit {
                train_indices,
                test_indices,
                fold_idx,
            }
        })
        .collect()
}

fn k_fold_split(n_samples: usize, n_splits: usize) -> Result<Vec<CVSplit>, ModelError> {
    validate_n_splits(n_samples, n_splits)?;

    let base = n_samples / n_splits;
    let remainder = n_samples % n_splits;
    let mut test_folds = Vec::with_capacity(n_samples);
    for fold_idx in 0..n_splits {
        let fold_size = if fold_idx < remainder { base + 1 } else { base };
        test_folds.extend(std::iter::repeat_n(fold_idx, fold_size));
    }

    Ok(splits_from_folds(&test_folds, n_splits))
}

fn stratified_k_fold_split(
    y: ArrayView1<f64>,
    n_splits: usize,
) -> Result<Vec<CVSplit>, ModelError> {
    let n_samples = y.len();
    validate_n_splits(n_samples, n_splits)?;

    // classes numbered by first appearance
    let mut class_of: AHashMap<u64, usize> = AHashMap::new();
    let encoded: Vec<usize> = y
        .iter()
        .map(|&v| {
            let key = (if v == 0.0 { 0.0f64 } else { v }).to_bits();
            let next = class_of.len();
            *class_of.entry(key).or_insert(next)
        })
        .collect();
    let n_classes = class_of.len();

    let mut class_counts = vec![0usize; n_classes];
    for &k in &encoded {
        class_counts[k] += 1;
    }
    if class_counts.iter().all(|&c| c < n_splits) {
        return Err(ModelError::InputValidationError(format!(
            "n_splits={} cannot be greater than the number of members in each class",
            n_splits
        )));
    }
    if let Some(&smallest) = class_counts.iter().min() {
        if smallest < n_splits {
            warn!(
                "the least populated class has only {} members, which is less than n_splits={}",
                smallest, n_splits
            );
        }
    }

    // Walking the sorted labels with stride n_splits spreads every class as evenly
    // as possible over the folds.
    let mut sorted = encoded.clone();
    sorted.sort_unstable();
    let mut allocation = vec![vec![0usize; n_classes]; n_splits];
    for (position, &k) in sorted.iter().enumerate() {
        allocation[position % n_splits][k] += 1;
    }

    let mut test_folds = vec![0usize; n_samples];
    for k in 0..n_classes {
        let folds_for_class: Vec<usize> = (0..n_splits)
            .flat_map(|fold_idx| std::iter::repeat_n(fold_idx, allocation[fold_idx][k]))
            .collect();
        let members = (0..n_samples).filter(|&i| encoded[i] == k);
        for (i, fold_idx) in members.zip(folds_for_class) {
            test_folds[i] = fold_idx;
        }
    }

    Ok(splits_from_folds(&test_folds, n_splits))
}

impl CVStrategy {
    /// Number of folds
    pub fn n_splits(&self) -> usize {
        match *self {
            CVStrategy::KFold { n_splits } | CVStrategy::StratifiedKFold { n_splits } => n_splits,
        }
    }

    /// Generate train/test splits for the rows of `y`
    ///
    /// # Parameters
    ///
    /// * `y` - Target values; only their count matters for `KFold`
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<CVSplit>)` - One split per fold; the test sides partition the rows
    /// - `Err(ModelError::InputValidationError)` - If `n_splits < 2`, there are fewer rows than folds,
    ///   or (stratified) every class has fewer members than folds
    pub fn split(&self, y: ArrayView1<f64>) -> Result<Vec<CVSplit>, ModelError> {
        match *self {
            CVStrategy::KFold { n_splits } => k_fold_split(y.len(), n_splits),
            CVStrategy::StratifiedKFold { n_splits } => stratified_k_fold_split(y, n_splits),
        }
    }
}

/// Evaluates a model by cross-validation.
///
/// For every fold a fresh copy of `model` is fitted on the training rows and scored
/// on the held-out rows, so `model` itself is never modified.
///
/// # Parameters
///
/// * `model` - Unfitted estimator used as a template for every fold
/// * `x` - Feature matrix
/// * `y` - Target values aligned with the rows of `x`
/// * `strategy` - Fold assignment
/// * `scoring` - Metric computed on each held-out fold
///
/// # Returns
///
/// - `Ok(Vec<f64>)` - One score per fold, in fold order
/// - `Err(ModelError)` - If the folds cannot be built, a fit fails, or a score is undefined
///
/// # Examples
/// ```rust
/// use diabetes_insight::machine_learning::{CVStrategy, LinearRegression, Scoring, cross_val_score};
/// use ndarray::{Array1, Array2};
///
/// let x = Array2::from_shape_fn((10, 1), |(i, _)| i as f64);
/// let y = Array1::from_shape_fn(10, |i| 3.0 * i as f64 + 1.0);
/// let scores = cross_val_score(
///     &LinearRegression::default(),
///     x.view(),
///     y.view(),
///     CVStrategy::KFold { n_splits: 5 },
///     Scoring::D2AbsoluteError,
/// )
/// .unwrap();
/// assert_eq!(scores.len(), 5);
/// assert!(scores.iter().all(|s| (s - 1.0).abs() < 1e-6));
/// ```
pub fn cross_val_score<M>(
    model: &M,
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    strategy: CVStrategy,
    scoring: Scoring,
) -> Result<Vec<f64>, ModelError>
where
    M: SupervisedModel + Clone,
{
    if x.nrows() != y.len() {
        return Err(ModelError::InputValidationError(format!(
            "Input data and target vector have different lengths, x rows: {}, y length: {}",
            x.nrows(),
            y.len()
        )));
    }

    let splits = strategy.split(y)?;
    let mut scores = Vec::with_capacity(splits.len());
    for split in &splits {
        let x_train = x.select(Axis(0), &split.train_indices);
        let y_train = y.select(Axis(0), &split.train_indices);
        let x_test = x.select(Axis(0), &split.test_indices);
        let y_test = y.select(Axis(0), &split.test_indices);

        let mut fold_model = model.clone();
        fold_model.fit_model(x_train.view(), y_train.view())?;
        let predicted = fold_model.predict_values(x_test.view())?;
        let score = scoring
            .score(predicted.view(), y_test.view())
            .map_err(|e| ModelError::ProcessingError(format!("fold {}: {}", split.fold_idx, e)))?;
        debug!("fold {} {:?} score: {}", split.fold_idx, scoring, score);
        scores.push(score);
    }

    Ok(scores)
}
