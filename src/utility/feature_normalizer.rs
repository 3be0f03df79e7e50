use crate::dataset::{Column, DiabetesDataset, DiabetesRecord};
use crate::error::TransformError;
use log::info;
use std::fmt;

/// Raw `smoking_history` values that collapse into [`SmokingBucket::Never`]
pub const NEVER_SMOKING_CATEGORIES: [&str; 2] = ["never", "No Info"];

/// Raw `smoking_history` values that collapse into [`SmokingBucket::Former`]
pub const FORMER_SMOKING_CATEGORIES: [&str; 3] = ["ever", "former", "not current"];

/// Raw `smoking_history` values that collapse into [`SmokingBucket::Current`]
pub const CURRENT_SMOKING_CATEGORIES: [&str; 1] = ["current"];

/// Coarse smoking status used for modelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmokingBucket {
    Never,
    Former,
    Current,
}

impl SmokingBucket {
    /// Value written back into the `smoking_history` column
    pub fn as_str(self) -> &'static str {
        match self {
            SmokingBucket::Never => "never",
            SmokingBucket::Former => "former",
            SmokingBucket::Current => "current",
        }
    }
}

impl fmt::Display for SmokingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps one raw `smoking_history` value onto its bucket.
///
/// # Parameters
///
/// - `value` - Raw category, matched exactly (case-sensitive)
/// - `row` - 1-based data row, reported on failure
///
/// # Returns
///
/// - `Ok(SmokingBucket)` - The bucket listing `value`
/// - `Err(TransformError::UnmappedCategory)` - If no bucket lists `value`
///
/// # Examples
/// ```rust
/// use diabetes_insight::utility::{SmokingBucket, bucket_smoking_history};
///
/// assert_eq!(bucket_smoking_history("No Info", 1).unwrap(), SmokingBucket::Never);
/// assert_eq!(bucket_smoking_history("not current", 2).unwrap(), SmokingBucket::Former);
/// assert!(bucket_smoking_history("sometimes", 3).is_err());
/// ```
pub fn bucket_smoking_history(value: &str, row: usize) -> Result<SmokingBucket, TransformError> {
    if NEVER_SMOKING_CATEGORIES.contains(&value) {
        Ok(SmokingBucket::Never)
    } else if FORMER_SMOKING_CATEGORIES.contains(&value) {
        Ok(SmokingBucket::Former)
    } else if CURRENT_SMOKING_CATEGORIES.contains(&value) {
        Ok(SmokingBucket::Current)
    } else {
        Err(TransformError::UnmappedCategory {
            column: Column::SmokingHistory.name(),
            value: value.to_string(),
            row,
        })
    }
}

/// Prepares the table for modelling.
///
/// Every `smoking_history` value is first replaced by its bucket name, then the rows
/// whose gender equals `excluded_gender` are dropped. The input is left untouched.
///
/// # Parameters
///
/// - `dataset` - Raw table
/// - `excluded_gender` - Gender value whose rows are removed, usually `"Other"`
///
/// # Returns
///
/// - `Ok(DiabetesDataset)` - The cleaned table, rows in their original order
/// - `Err(TransformError::UnmappedCategory)` - On the first smoking value outside the bucket tables
pub fn normalize_dataset(
    dataset: &DiabetesDataset,
    excluded_gender: &str,
) -> Result<DiabetesDataset, TransformError> {
    let bucketed = dataset
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let bucket = bucket_smoking_history(&record.smoking_history, i + 1)?;
            Ok(DiabetesRecord {
                smoking_history: bucket.as_str().to_string(),
                ..record.clone()
            })
        })
        .collect::<Result<Vec<_>, TransformError>>()?;

    let before = bucketed.len();
    let kept: Vec<DiabetesRecord> = bucketed
        .into_iter()
        .filter(|record| record.gender != excluded_gender)
        .collect();
    info!(
        "normalized features: {} rows kept, {} rows with gender `{}` removed",
        kept.len(),
        before - kept.len(),
        excluded_gender
    );

    Ok(DiabetesDataset::new(kept))
}
