//! Exploratory analysis and baseline risk models for the diabetes prediction dataset.
//!
//! A run loads the CSV table, describes every column, counts BMI outliers, normalizes the
//! categorical columns, splits the rows with a fixed seed, ordinally encodes the features and
//! fits a logistic and a linear regression whose metrics end up in a labeled text report.

/// A macro that generates a getter method for any field.
///
/// This macro creates a public getter method that returns the value of the specified field.
/// The generated method includes appropriate documentation describing the field being accessed.
///
/// # Parameters
///
/// - `$method_name` - The name of the getter method (e.g., get_max_iterations)
/// - `$field_name` - The name of the field to access (e.g., max_iter)
/// - `$return_type` - The return type of the getter method
///
/// # Generated Method
///
/// The macro generates a method that returns the field value,
/// with documentation that describes what field is being accessed.
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// Error types of every stage, from reading the CSV to rendering images
pub mod error;

/// Settings of a pipeline run and their defaults
pub mod config;

/// Loading and inspection of the diabetes prediction table.
///
/// # Examples
/// ```rust
/// use diabetes_insight::dataset::DiabetesDataset;
///
/// let csv = "gender,age,hypertension,heart_disease,smoking_history,bmi,HbA1c_level,blood_glucose_level,diabetes\n\
///            Female,80.0,0,1,never,25.19,6.6,140,0\n";
/// let dataset = DiabetesDataset::from_reader(csv.as_bytes()).unwrap();
/// assert_eq!(dataset.shape(), (1, 9));
/// ```
pub mod dataset;

/// Module `math` contains the numeric building blocks shared by the statistics and the models.
///
/// # Core Functions
///
/// - `sigmoid` - Logistic function used by logistic regression
/// - `logistic_loss` - Summed cross-entropy over raw logits
/// - `sum_of_squared_errors` / `sum_of_absolute_errors` - Residual totals
/// - `sorted_finite`, `quantile_sorted`, `median`, `mode` - Order statistics
pub mod math;

/// Descriptive statistics, outlier counts and charts of the raw table
pub mod analysis;

/// Preprocessing utilities applied between the raw table and the models.
///
/// - **feature_normalizer**: Smoking history buckets and gender filtering
/// - **train_test_split**: Seeded shuffling split into training and test rows
/// - **ordinal_encoding**: Category codes learned from the training rows
pub mod utility;

/// Module `machine_learning` provides the two baseline models and cross-validation.
///
/// - **LogisticRegression**: L2-regularized binary classifier fitted by Newton iterations
/// - **LinearRegression**: Ordinary least squares through an SVD pseudo-inverse
/// - **cross_val_score**: Unshuffled k-fold and stratified k-fold scoring
///
/// # Examples
/// ```rust
/// use diabetes_insight::machine_learning::*;
/// use ndarray::array;
///
/// let x = array![[1.0], [2.0], [3.0], [4.0]];
/// let y = array![3.0, 5.0, 7.0, 9.0];
/// let mut model = LinearRegression::default();
/// model.fit(x.view(), y.view()).unwrap();
/// ```
pub mod machine_learning;

/// Evaluation metrics for the regression and classification models.
///
/// # Regression Metrics
/// - **mean_squared_error**, **root_mean_squared_error**, **mean_absolute_error**
/// - **d2_absolute_error_score**: Share of absolute deviation around the median explained by the model
///
/// # Classification Metrics
/// - **accuracy_score**: Share of exact matches
/// - **ConfusionMatrix**: Binary counts plus accuracy, sensitivity, precision, specificity and F1
pub mod metric;

/// Traits shared by the models
pub mod traits;

/// The stages of an analysis run and the report they produce
pub mod pipeline;

/// A convenience module that re-exports the most commonly used types and functions from this crate.
///
/// # Examples
/// ```rust
/// use diabetes_insight::prelude::*;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.cv_folds, 5);
/// ```
pub mod prelude;

pub use error::ModelError;
