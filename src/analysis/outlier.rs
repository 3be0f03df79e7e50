use crate::config::OutlierBounds;
use crate::dataset::{Column, DiabetesDataset};
use ahash::AHashSet;
use std::fmt;

/// Result of a fixed-threshold outlier count
///
/// # Fields
///
/// - `column` - Column that was scanned
/// - `bounds` - Literal thresholds used
/// - `distinct_values` - Number of distinct values outside the bounds (the reported figure)
/// - `rows` - Number of rows whose value lies outside the bounds
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierCount {
    pub column: Column,
    pub bounds: OutlierBounds,
    pub distinct_values: usize,
    pub rows: usize,
}

/// Counts values of a numeric column that fall outside fixed bounds.
///
/// The thresholds are domain constants, not learned from the data. Distinct outlying
/// values and outlying rows are both reported.
///
/// # Parameters
///
/// - `column` - Column being scanned, kept for reporting
/// - `values` - Observations of the column
/// - `bounds` - Closed interval of non-outlying values
///
/// # Returns
///
/// - `OutlierCount` - Distinct and per-row outlier counts
///
/// # Examples
/// ```rust
/// use diabetes_insight::analysis::count_outliers;
/// use diabetes_insight::config::OutlierBounds;
/// use diabetes_insight::dataset::Column;
///
/// let bmi = [10.0, 10.0, 20.0, 40.0, 38.5];
/// let count = count_outliers(Column::Bmi, &bmi, OutlierBounds::default());
/// assert_eq!(count.distinct_values, 2);
/// assert_eq!(count.rows, 3);
/// ```
pub fn count_outliers(column: Column, values: &[f64], bounds: OutlierBounds) -> OutlierCount {
    let outlying: Vec<f64> = values
        .iter()
        .copied()
        .filter(|&v| bounds.is_outlier(v))
        .collect();
    let distinct_values = outlying
        .iter()
        .map(|v| v.to_bits())
        .collect::<AHashSet<u64>>()
        .len();
    let rows = outlying.len();

    OutlierCount {
        column,
        bounds,
        distinct_values,
        rows,
    }
}

/// Runs [`count_outliers`] on the BMI column of a table
pub fn count_bmi_outliers(dataset: &DiabetesDataset, bounds: OutlierBounds) -> OutlierCount {
    let bmi: Vec<f64> = dataset.records().iter().map(|r| r.bmi).collect();
    count_outliers(Column::Bmi, &bmi, bounds)
}

impl fmt::Display for OutlierCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.column {
            Column::Bmi => "BMI".to_string(),
            other => other.name().to_string(),
        };
        writeln!(f, "Total outliers for {}  {}", name, self.distinct_values)
    }
}
