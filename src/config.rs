use crate::utility::UnknownCategoryPolicy;
use std::path::PathBuf;

/// File read when no path is given on the command line
pub const DEFAULT_INPUT_FILE: &str = "diabetes_prediction_dataset.csv";

/// Share of rows held out for testing
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Seed of the train/test shuffle
pub const DEFAULT_RANDOM_STATE: u64 = 0;

/// Number of folds used by every cross-validation run
pub const DEFAULT_CV_FOLDS: usize = 5;

/// Number of equal-width bins in each histogram
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Lowest BMI not counted as an outlier
pub const BMI_OUTLIER_LOWER: f64 = 14.71;

/// Highest BMI not counted as an outlier
pub const BMI_OUTLIER_UPPER: f64 = 38.5;

/// Gender value whose rows are dropped before modelling
pub const EXCLUDED_GENDER: &str = "Other";

/// Closed interval of values that are not outliers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBounds {
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        OutlierBounds { lower, upper }
    }

    /// Whether `value` falls outside the bounds
    pub fn is_outlier(&self, value: f64) -> bool {
        value > self.upper || value < self.lower
    }
}

impl Default for OutlierBounds {
    fn default() -> Self {
        OutlierBounds::new(BMI_OUTLIER_LOWER, BMI_OUTLIER_UPPER)
    }
}

/// Settings of a full pipeline run
///
/// # Fields
///
/// - `input_path` - CSV file to analyse
/// - `output_dir` - Directory receiving the PNG files
/// - `test_size` - Share of rows in the test partition
/// - `random_state` - Seed of the train/test shuffle
/// - `cv_folds` - Folds of each cross-validation
/// - `histogram_bins` - Bins per histogram
/// - `bmi_outlier_bounds` - Literal BMI thresholds of the outlier count
/// - `excluded_gender` - Gender value removed before modelling
/// - `unknown_category_policy` - What the encoder does with categories unseen during fit
/// - `render_plots` - Whether PNG files are written at all
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub test_size: f64,
    pub random_state: u64,
    pub cv_folds: usize,
    pub histogram_bins: usize,
    pub bmi_outlier_bounds: OutlierBounds,
    pub excluded_gender: String,
    pub unknown_category_policy: UnknownCategoryPolicy,
    pub render_plots: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from("."),
            test_size: DEFAULT_TEST_SIZE,
            random_state: DEFAULT_RANDOM_STATE,
            cv_folds: DEFAULT_CV_FOLDS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            bmi_outlier_bounds: OutlierBounds::default(),
            excluded_gender: EXCLUDED_GENDER.to_string(),
            unknown_category_policy: UnknownCategoryPolicy::default(),
            render_plots: cfg!(feature = "plot"),
        }
    }
}

impl PipelineConfig {
    /// Default settings reading from `input_path`
    pub fn with_input<P: Into<PathBuf>>(input_path: P) -> Self {
        PipelineConfig {
            input_path: input_path.into(),
            ..Default::default()
        }
    }
}
