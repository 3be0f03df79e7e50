//! The analysis run, one function per stage.
//!
//! Every stage takes the previous stage's output by reference and returns a new value;
//! only loading the CSV and rendering the images touch the filesystem.

use crate::analysis::{DescriptiveReport, OutlierCount, count_bmi_outliers, value_counts};
use crate::config::PipelineConfig;
use crate::dataset::{DiabetesDataset, DiabetesRecord};
use crate::error::{ModelError, PipelineError, TransformError};
use crate::machine_learning::{
    CVStrategy, LinearRegression, LogisticRegression, Scoring, cross_val_score,
};
use crate::metric::{
    ConfusionMatrix, accuracy_score, d2_absolute_error_score, mean_absolute_error,
    mean_squared_error, root_mean_squared_error,
};
use crate::traits::LinearModelGetterFunctions;
use crate::utility::{OrdinalEncoder, TrainTestSplit, labels, normalize_dataset, train_test_split};
use log::{info, warn};
use ndarray::{Array1, Array2};
use std::path::PathBuf;

/// Labeled text report of a run and the types it is made of
pub mod report;

pub use report::*;

/// Summary statistics and the BMI outlier count of the raw table
///
/// # Errors
///
/// - `ModelError::InputValidationError` - If a numerical column has no finite values
pub fn describe(
    dataset: &DiabetesDataset,
    config: &PipelineConfig,
) -> Result<(DescriptiveReport, OutlierCount), ModelError> {
    let descriptive = DescriptiveReport::from_dataset(dataset)?;
    let outliers = count_bmi_outliers(dataset, config.bmi_outlier_bounds);
    info!(
        "described {} categorical and {} numerical columns; {} distinct BMI outliers",
        descriptive.categorical.len(),
        descriptive.numerical.len(),
        outliers.distinct_values
    );
    Ok((descriptive, outliers))
}

/// Buckets smoking history and drops the excluded gender
pub fn normalize(
    dataset: &DiabetesDataset,
    config: &PipelineConfig,
) -> Result<DiabetesDataset, TransformError> {
    normalize_dataset(dataset, &config.excluded_gender)
}

/// Seeded train/test split of the cleaned rows
pub fn split(
    dataset: &DiabetesDataset,
    config: &PipelineConfig,
) -> Result<TrainTestSplit<DiabetesRecord>, ModelError> {
    train_test_split(dataset.records(), config.test_size, config.random_state)
}

/// Feature matrices and label vectors of both partitions, plus the encoder that built them
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSplit {
    pub encoder: OrdinalEncoder,
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Fits the ordinal encoder on the training rows and encodes both partitions
///
/// # Errors
///
/// - `TransformError::UnknownCategory` - If a test category is new and the policy is `Error`
/// - `TransformError::Model` - If the training partition is empty
pub fn encode(
    split: &TrainTestSplit<DiabetesRecord>,
    config: &PipelineConfig,
) -> Result<EncodedSplit, TransformError> {
    let mut encoder = OrdinalEncoder::new(config.unknown_category_policy);
    let x_train = encoder.fit_transform(&split.train)?;
    let x_test = encoder.transform(&split.test)?;
    Ok(EncodedSplit {
        encoder,
        x_train,
        x_test,
        y_train: labels(&split.train),
        y_test: labels(&split.test),
    })
}

fn count_labels(values: &Array1<f64>) -> Vec<(String, usize)> {
    value_counts(values.iter().map(|v| format!("{}", v)))
}

fn cross_validate<M>(
    model: &M,
    data: &EncodedSplit,
    strategy: CVStrategy,
    scoring: Scoring,
) -> Result<Vec<f64>, ModelError>
where
    M: crate::traits::SupervisedModel + Clone,
{
    let scores = cross_val_score(
        model,
        data.x_train.view(),
        data.y_train.view(),
        strategy,
        scoring,
    );
    if let Err(e) = &scores {
        warn!("cross-validation skipped: {}", e);
    }
    scores
}

/// Fits the logistic regression and evaluates it
///
/// Cross-validation runs on the training partition with stratified, unshuffled folds.
/// A partition too small for the folds leaves the scores undefined instead of failing.
///
/// # Errors
///
/// - `PipelineError::Model` - If fitting or predicting fails
/// - `PipelineError::Metric` - If the confusion matrix cannot be built
pub fn train_classifier(
    data: &EncodedSplit,
    config: &PipelineConfig,
) -> Result<ClassifierReport, PipelineError> {
    let template = LogisticRegression::default();
    let mut model = template.clone();
    model.fit(&data.x_train, &data.y_train)?;

    let predicted_test = model.predict(&data.x_test)?.mapv(f64::from);
    let predicted_train = model.predict(&data.x_train)?.mapv(f64::from);
    let test_accuracy = accuracy_score(&predicted_test, &data.y_test)?;
    let train_accuracy = accuracy_score(&predicted_train, &data.y_train)?;

    let cv_scores = cross_validate(
        &template,
        data,
        CVStrategy::StratifiedKFold {
            n_splits: config.cv_folds,
        },
        Scoring::Accuracy,
    );

    let confusion_matrix = ConfusionMatrix::new(&predicted_test, &data.y_test)?;
    let metrics = confusion_matrix.metrics();
    info!(
        "logistic regression: test accuracy {:.4}, train accuracy {:.4}",
        test_accuracy, train_accuracy
    );

    Ok(ClassifierReport {
        test_accuracy,
        train_accuracy,
        cv_scores,
        test_label_counts: count_labels(&data.y_test),
        prediction_counts: count_labels(&predicted_test),
        confusion_matrix,
        metrics,
        iterations: model.get_actual_iterations().unwrap_or(0),
        converged: model.get_converged().unwrap_or(false),
        coefficients: model.get_coefficients()?.clone(),
        intercept: model.get_intercept()?,
    })
}

/// Fits the least-squares regression on the 0/1 label and evaluates it
///
/// Cross-validated D² scores use unshuffled k-fold splits of the training partition.
///
/// # Errors
///
/// - `PipelineError::Model` - If fitting or predicting fails
/// - `PipelineError::Metric` - If a metric input is malformed
pub fn train_regressor(
    data: &EncodedSplit,
    config: &PipelineConfig,
) -> Result<RegressorReport, PipelineError> {
    let template = LinearRegression::default();
    let mut model = template.clone();
    model.fit(data.x_train.view(), data.y_train.view())?;

    let predicted_test = model.predict(data.x_test.view())?;
    let predicted_train = model.predict(data.x_train.view())?;

    let cv_scores = cross_validate(
        &template,
        data,
        CVStrategy::KFold {
            n_splits: config.cv_folds,
        },
        Scoring::D2AbsoluteError,
    );

    let report = RegressorReport {
        test_d2: d2_absolute_error_score(&predicted_test, &data.y_test)?,
        train_d2: d2_absolute_error_score(&predicted_train, &data.y_train)?,
        cv_scores,
        mean_absolute_error: mean_absolute_error(&predicted_test, &data.y_test)?,
        mean_squared_error: mean_squared_error(&predicted_test, &data.y_test)?,
        root_mean_squared_error: root_mean_squared_error(&predicted_test, &data.y_test)?,
        coefficients: model.get_coefficients()?.clone(),
        intercept: model.get_intercept()?,
    };
    info!(
        "linear regression: test D2 {:.4}, train D2 {:.4}",
        report.test_d2, report.train_d2
    );
    Ok(report)
}

#[cfg(feature = "plot")]
fn render_descriptive_plots(
    dataset: &DiabetesDataset,
    descriptive: &DescriptiveReport,
    config: &PipelineConfig,
) -> Result<Vec<PathBuf>, PipelineError> {
    use crate::analysis::{BoxPlotStats, draw_boxplot, draw_histogram, histogram_bins};

    let mut written = Vec::new();
    for summary in &descriptive.numerical {
        let values = dataset
            .numeric_column(summary.column)
            .map(|v| v.to_vec())
            .unwrap_or_default();
        let stats = BoxPlotStats::new(summary, &values);
        written.push(draw_boxplot(&config.output_dir, summary.column, &stats)?);
        let bins = histogram_bins(summary.column.name(), &values, config.histogram_bins)?;
        written.push(draw_histogram(&config.output_dir, summary.column, &bins)?);
    }
    Ok(written)
}

#[cfg(not(feature = "plot"))]
fn render_descriptive_plots(
    _dataset: &DiabetesDataset,
    _descriptive: &DescriptiveReport,
    _config: &PipelineConfig,
) -> Result<Vec<PathBuf>, PipelineError> {
    warn!("built without the `plot` feature; no images are written");
    Ok(Vec::new())
}

#[cfg(feature = "plot")]
fn render_confusion_matrix(
    matrix: &ConfusionMatrix,
    config: &PipelineConfig,
) -> Result<Vec<PathBuf>, PipelineError> {
    Ok(vec![crate::analysis::draw_confusion_heatmap(
        &config.output_dir,
        matrix,
    )?])
}

#[cfg(not(feature = "plot"))]
fn render_confusion_matrix(
    _matrix: &ConfusionMatrix,
    _config: &PipelineConfig,
) -> Result<Vec<PathBuf>, PipelineError> {
    Ok(Vec::new())
}

/// Runs every stage on an already loaded table
///
/// # Errors
///
/// Any stage error, wrapped in `PipelineError`; image failures are fatal.
pub fn run_on_dataset(
    dataset: &DiabetesDataset,
    config: &PipelineConfig,
) -> Result<PipelineReport, PipelineError> {
    let overview = DatasetOverview::from_dataset(dataset);
    let (descriptive, bmi_outliers) = describe(dataset, config)?;

    let mut plots = Vec::new();
    if config.render_plots {
        plots.extend(render_descriptive_plots(dataset, &descriptive, config)?);
    }

    let cleaned = normalize(dataset, config)?;
    let partition = split(&cleaned, config)?;
    let encoded = encode(&partition, config)?;

    let classifier = train_classifier(&encoded, config)?;
    if config.render_plots {
        plots.extend(render_confusion_matrix(&classifier.confusion_matrix, config)?);
    }

    let regressor = train_regressor(&encoded, config)?;

    Ok(PipelineReport {
        overview,
        descriptive,
        bmi_outliers,
        rows_after_cleaning: cleaned.len(),
        train_rows: partition.train.len(),
        test_rows: partition.test.len(),
        classifier,
        regressor,
        plots,
    })
}

/// Loads the CSV named in `config` and runs every stage on it
///
/// # Errors
///
/// - `PipelineError::Dataset` - If the file cannot be read or parsed
/// - Any error of [`run_on_dataset`]
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let dataset = DiabetesDataset::from_path(&config.input_path)?;
    run_on_dataset(&dataset, config)
}
