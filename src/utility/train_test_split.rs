use crate::error::ModelError;
use log::info;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// The two sides of a train/test split
///
/// # Fields
///
/// - `train` / `test` - The items on each side
/// - `train_indices` / `test_indices` - Positions of those items in the input slice
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Number of test rows for `n_samples` rows: `ceil(n_samples * test_size)`, clamped
/// so both sides keep at least one row.
fn test_count(n_samples: usize, test_size: f64) -> usize {
    let calculated = (n_samples as f64 * test_size).ceil() as usize;
    calculated.max(1).min(n_samples - 1)
}

/// Draws shuffled train and test positions for `n_samples` rows
///
/// # Parameters
///
/// - `n_samples` - Number of rows to split
/// - `test_size` - Share of rows in the test side, strictly between 0 and 1
/// - `random_state` - Seed of the shuffle
///
/// # Returns
///
/// - `Ok((train_indices, test_indices))` - Disjoint positions that together cover `0..n_samples`
///
/// # Errors
///
/// - `ModelError::InputValidationError` - If there are fewer than 2 rows or `test_size` lies outside (0, 1)
pub fn split_indices(
    n_samples: usize,
    test_size: f64,
    random_state: u64,
) -> Result<(Vec<usize>, Vec<usize>), ModelError> {
    if n_samples == 0 {
        return Err(ModelError::InputValidationError(
            "Cannot split empty dataset".to_string(),
        ));
    }
    if n_samples == 1 {
        return Err(ModelError::InputValidationError(
            "Cannot split a dataset with only 1 sample into train and test sets".to_string(),
        ));
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ModelError::InputValidationError(format!(
            "test_size must be between 0 and 1 (exclusive), got {}",
            test_size
        )));
    }

    let n_test = test_count(n_samples, test_size);

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(random_state);
    indices.shuffle(&mut rng);

    let train_indices = indices.split_off(n_test);
    Ok((train_indices, indices))
}

/// Splits items into training and test sets
///
/// The same items, `test_size` and `random_state` always produce the same split.
///
/// # Parameters
///
/// - `items` - Rows to split, usually the records of a table
/// - `test_size` - Share of rows in the test side, strictly between 0 and 1
/// - `random_state` - Seed of the shuffle
///
/// # Returns
///
/// - `Result<TrainTestSplit<T>, ModelError>` - Both sides with the source positions of their rows
///
/// # Errors
///
/// - Returns `ModelError::InputValidationError` if there are fewer than 2 items or `test_size` is not between 0 and 1.
///
/// # Example
/// ```rust
/// use diabetes_insight::utility::train_test_split;
///
/// let rows: Vec<u32> = (0..10).collect();
/// let split = train_test_split(&rows, 0.2, 0).unwrap();
/// assert_eq!(split.train.len(), 8);
/// assert_eq!(split.test.len(), 2);
/// assert!(split.test_indices.iter().all(|i| !split.train_indices.contains(i)));
/// ```
pub fn train_test_split<T: Clone>(
    items: &[T],
    test_size: f64,
    random_state: u64,
) -> Result<TrainTestSplit<T>, ModelError> {
    let (train_indices, test_indices) = split_indices(items.len(), test_size, random_state)?;

    let train = train_indices.iter().map(|&i| items[i].clone()).collect();
    let test = test_indices.iter().map(|&i| items[i].clone()).collect();
    info!(
        "split {} rows into {} train and {} test rows (seed {})",
        items.len(),
        train_indices.len(),
        test_indices.len(),
        random_state
    );

    Ok(TrainTestSplit {
        train,
        test,
        train_indices,
        test_indices,
    })
}
