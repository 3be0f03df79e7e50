use crate::dataset::{CATEGORICAL_COLUMNS, Column, DiabetesDataset, NUMERICAL_COLUMNS};
use crate::error::ModelError;
use crate::math::{mode, quantile_sorted, sorted_finite};
use ahash::AHashMap;
use statrs::statistics::Statistics;
use std::fmt;

/// Counts each distinct value, most frequent first.
///
/// Ties keep the order in which the values first appear.
///
/// # Parameters
///
/// * `values` - Observations of one categorical column
///
/// # Returns
///
/// * `Vec<(String, usize)>` - `(value, count)` pairs in descending count order
///
/// # Examples
/// ```rust
/// use diabetes_insight::analysis::value_counts;
///
/// let counts = value_counts(["b", "a", "b", "c", "a", "b"]);
/// assert_eq!(
///     counts,
///     vec![("b".to_string(), 3), ("a".to_string(), 2), ("c".to_string(), 1)]
/// );
/// ```
pub fn value_counts<I, S>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut position: AHashMap<String, usize> = AHashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        let value = value.as_ref();
        match position.get(value) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                position.insert(value.to_string(), counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    // stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Distinct values and their frequencies for one categorical column
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub column: Column,
    pub counts: Vec<(String, usize)>,
}

impl CategoricalSummary {
    /// Summarises `column` over every row of `dataset`
    pub fn from_dataset(dataset: &DiabetesDataset, column: Column) -> Self {
        CategoricalSummary {
            column,
            counts: value_counts(dataset.text_column(column)),
        }
    }

    /// Number of distinct values
    pub fn n_unique(&self) -> usize {
        self.counts.len()
    }
}

impl fmt::Display for CategoricalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  contains  {}  labels", self.column, self.n_unique())?;
        let width = self
            .counts
            .iter()
            .map(|(v, _)| v.len())
            .chain(std::iter::once(self.column.name().len()))
            .max()
            .unwrap_or(0);
        writeln!(f, "{:<width$}", self.column.name())?;
        for (value, count) in &self.counts {
            writeln!(f, "{:<width$}    {}", value, count)?;
        }
        Ok(())
    }
}

/// Descriptive statistics of one numerical column
///
/// # Fields
///
/// - `count` - Number of finite observations
/// - `mean` - Arithmetic mean
/// - `std` - Sample standard deviation (n - 1 denominator)
/// - `min` / `max` - Extremes
/// - `q1` / `median` / `q3` - Quartiles by linear interpolation
/// - `mode` - Every most-frequent value, ascending
/// - `range` - `max - min`
/// - `variance` - Sample variance (n - 1 denominator)
/// - `iqr` - `q3 - q1`
#[derive(Debug, Clone, PartialEq)]
pub struct NumericalSummary {
    pub column: Column,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mode: Vec<f64>,
    pub range: f64,
    pub variance: f64,
    pub iqr: f64,
}

impl NumericalSummary {
    /// Computes the statistics of `values` for `column`
    ///
    /// Mean, variance and standard deviation come from `statrs`; quartiles use
    /// linear interpolation between order statistics. With a single observation the
    /// sample variance and standard deviation are NaN.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `values` holds no finite observation
    pub fn from_values(column: Column, values: &[f64]) -> Result<Self, ModelError> {
        let sorted = sorted_finite(values);
        if sorted.is_empty() {
            return Err(ModelError::InputValidationError(format!(
                "column `{}` has no finite values to describe",
                column
            )));
        }

        let mean = Statistics::mean(sorted.iter());
        let variance = Statistics::variance(sorted.iter());
        let std = Statistics::std_dev(sorted.iter());
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        // quantile_sorted only fails on empty input, checked above
        let q1 = quantile_sorted(&sorted, 0.25).unwrap_or(min);
        let median = quantile_sorted(&sorted, 0.5).unwrap_or(min);
        let q3 = quantile_sorted(&sorted, 0.75).unwrap_or(max);

        Ok(NumericalSummary {
            column,
            count: sorted.len(),
            mean,
            std,
            min,
            q1,
            median,
            q3,
            max,
            mode: mode(&sorted),
            range: max - min,
            variance,
            iqr: q3 - q1,
        })
    }

    /// Summarises `column` over every row of `dataset`
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `column` is not numeric or has no finite values
    pub fn from_dataset(dataset: &DiabetesDataset, column: Column) -> Result<Self, ModelError> {
        let values = dataset.numeric_column(column).ok_or_else(|| {
            ModelError::InputValidationError(format!("column `{}` is not numeric", column))
        })?;
        Self::from_values(column, &values.to_vec())
    }
}

impl fmt::Display for NumericalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count\t\t{:.6}", self.count as f64)?;
        writeln!(f, "mean\t\t{:.6}", self.mean)?;
        writeln!(f, "std\t\t{:.6}", self.std)?;
        writeln!(f, "min\t\t{:.6}", self.min)?;
        writeln!(f, "25%\t\t{:.6}", self.q1)?;
        writeln!(f, "50%\t\t{:.6}", self.median)?;
        writeln!(f, "75%\t\t{:.6}", self.q3)?;
        writeln!(f, "max\t\t{:.6}", self.max)?;
        writeln!(f, "Name: {}", self.column)?;
        let modes: Vec<String> = self.mode.iter().map(|m| m.to_string()).collect();
        writeln!(f, "mode\t\t {}", modes.join(", "))?;
        writeln!(f, "range\t\t {}", self.range)?;
        writeln!(f, "variance\t\t {}", self.variance)?;
        writeln!(f, "iqr\t\t {}", self.iqr)
    }
}

/// Every categorical and numerical summary of a table
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveReport {
    pub categorical: Vec<CategoricalSummary>,
    pub numerical: Vec<NumericalSummary>,
}

impl DescriptiveReport {
    /// Summarises the five categorical and four numerical columns
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If a numerical column has no finite values
    pub fn from_dataset(dataset: &DiabetesDataset) -> Result<Self, ModelError> {
        let categorical = CATEGORICAL_COLUMNS
            .iter()
            .map(|&c| CategoricalSummary::from_dataset(dataset, c))
            .collect();
        let numerical = NUMERICAL_COLUMNS
            .iter()
            .map(|&c| NumericalSummary::from_dataset(dataset, c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DescriptiveReport {
            categorical,
            numerical,
        })
    }

    /// Looks up the summary of a numerical column
    pub fn numerical(&self, column: Column) -> Option<&NumericalSummary> {
        self.numerical.iter().find(|s| s.column == column)
    }
}

impl fmt::Display for DescriptiveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.categorical {
            write!(f, "{}", summary)?;
        }
        for summary in &self.numerical {
            write!(f, "{}", summary)?;
        }
        Ok(())
    }
}
