//! Exploratory analysis of the raw table: summary statistics, outlier counts and charts.

/// Histogram bins, box plot geometry and the heat map palette
pub mod chart;
/// Value counts and descriptive statistics per column
pub mod descriptive;
/// Fixed-threshold outlier counting
pub mod outlier;
/// PNG rendering of histograms, box plots and the confusion matrix
#[cfg(feature = "plot")]
pub mod plot;

pub use chart::*;
pub use descriptive::*;
pub use outlier::*;
#[cfg(feature = "plot")]
pub use plot::*;
