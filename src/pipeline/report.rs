use crate::analysis::{DescriptiveReport, OutlierCount};
use crate::dataset::{DatasetInfo, DiabetesDataset};
use crate::error::ModelError;
use crate::metric::{ClassificationMetrics, ConfusionMatrix};
use ndarray::Array1;
use std::fmt;
use std::path::PathBuf;

/// Rows shown in the table preview
pub const HEAD_ROWS: usize = 5;

/// First look at the raw table
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOverview {
    pub head: String,
    pub shape: (usize, usize),
    pub column_names: Vec<&'static str>,
    pub info: DatasetInfo,
}

impl DatasetOverview {
    pub fn from_dataset(dataset: &DiabetesDataset) -> Self {
        DatasetOverview {
            head: dataset.head(HEAD_ROWS).to_string(),
            shape: dataset.shape(),
            column_names: dataset.column_names(),
            info: dataset.info(),
        }
    }
}

/// Evaluation of the logistic regression
///
/// # Fields
///
/// - `test_accuracy` / `train_accuracy` - Share of correct predictions on each partition
/// - `cv_scores` - Accuracy of each stratified fold, or why cross-validation could not run
/// - `test_label_counts` / `prediction_counts` - Label distribution of the test set and of its predictions
/// - `confusion_matrix` - Test predictions against test labels
/// - `metrics` - Scalars derived from the confusion matrix
/// - `iterations` / `converged` - Solver outcome
/// - `coefficients` / `intercept` - Fitted parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierReport {
    pub test_accuracy: f64,
    pub train_accuracy: f64,
    pub cv_scores: Result<Vec<f64>, ModelError>,
    pub test_label_counts: Vec<(String, usize)>,
    pub prediction_counts: Vec<(String, usize)>,
    pub confusion_matrix: ConfusionMatrix,
    pub metrics: ClassificationMetrics,
    pub iterations: usize,
    pub converged: bool,
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

/// Evaluation of the least-squares regression
#[derive(Debug, Clone, PartialEq)]
pub struct RegressorReport {
    pub test_d2: f64,
    pub train_d2: f64,
    pub cv_scores: Result<Vec<f64>, ModelError>,
    pub mean_absolute_error: f64,
    pub mean_squared_error: f64,
    pub root_mean_squared_error: f64,
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

/// Everything a run produced, printed as the labeled report
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub overview: DatasetOverview,
    pub descriptive: DescriptiveReport,
    pub bmi_outliers: OutlierCount,
    pub rows_after_cleaning: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub classifier: ClassifierReport,
    pub regressor: RegressorReport,
    pub plots: Vec<PathBuf>,
}

/// Fold scores rendered like a numeric array: `[0.96012345 0.95987654]`
pub struct ScoreList<'a>(pub &'a Result<Vec<f64>, ModelError>);

impl fmt::Display for ScoreList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(scores) => {
                let rendered: Vec<String> = scores.iter().map(|s| format!("{:.8}", s)).collect();
                write!(f, "[{}]", rendered.join(" "))
            }
            Err(e) => write!(f, "undefined ({})", e),
        }
    }
}

fn write_counts(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    counts: &[(String, usize)],
) -> fmt::Result {
    writeln!(f, "{}", title)?;
    for (value, count) in counts {
        writeln!(f, "{}    {}", value, count)?;
    }
    Ok(())
}

impl fmt::Display for DatasetOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        writeln!(f, "({}, {})", self.shape.0, self.shape.1)?;
        writeln!(f, "Columns: [{}]", self.column_names.join(", "))?;
        write!(f, "{}", self.info)
    }
}

impl fmt::Display for ClassifierReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Logistic Regression Model accuracy score: {:.4}",
            self.test_accuracy
        )?;
        writeln!(
            f,
            "Logistic Regression Model accuracy score: {:.4}",
            self.train_accuracy
        )?;
        writeln!(
            f,
            "Logistic Regression cross validation scores:{}",
            ScoreList(&self.cv_scores)
        )?;
        if self.converged {
            writeln!(
                f,
                "Logistic Regression solver: converged after {} iterations",
                self.iterations
            )?;
        } else {
            writeln!(
                f,
                "Logistic Regression solver: stopped after {} iterations without converging",
                self.iterations
            )?;
        }
        write_counts(f, "diabetes", &self.test_label_counts)?;
        write_counts(f, "predicted", &self.prediction_counts)?;
        writeln!(f, "{}", self.confusion_matrix.summary())?;
        write!(f, "{}", self.metrics)
    }
}

impl fmt::Display for RegressorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Linear Regression Model D2 absolute error score: {:.4}",
            self.test_d2
        )?;
        writeln!(
            f,
            "Linear Regression Model D2 absolute error score: {:.4}",
            self.train_d2
        )?;
        writeln!(f, "Cross validation scores:{}", ScoreList(&self.cv_scores))?;
        writeln!(
            f,
            "Linear Regression Model mean absolute error score: {:.4}",
            self.mean_absolute_error
        )?;
        writeln!(
            f,
            "Linear Regression Model mean squared error score: {:.4}",
            self.mean_squared_error
        )?;
        writeln!(
            f,
            "Linear Regression Model root mean squared error score: {:.4}",
            self.root_mean_squared_error
        )
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.overview)?;
        write!(f, "{}", self.descriptive)?;
        write!(f, "{}", self.bmi_outliers)?;
        write!(f, "{}", self.classifier)?;
        write!(f, "{}", self.regressor)
    }
}
