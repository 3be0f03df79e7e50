use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur during model operations
///
/// # Variants
///
/// - `NotFitted` - Indicates that the model (or encoder) has not been fitted yet
/// - `InputValidationError` - indicates the input data provided does not meet the expected format, type, or validation rules
/// - `ProcessingError` - indicates that there is something wrong while processing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error(
        "Model has not been fitted. Certain methods require the model to be fitted before use."
    )]
    NotFitted,
    #[error("Input validation error: {0}")]
    InputValidationError(String),
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

/// Errors raised while reading the input table
///
/// Every variant is fatal for the pipeline: nothing downstream can run without a valid table.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("row {row}: label column `diabetes` must be 0 or 1, got {value}")]
    InvalidLabel { row: usize, value: u8 },
    #[error("dataset contains no rows")]
    Empty,
}

/// Errors raised while reshaping categorical values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A raw value that the bucket table does not cover
    #[error("row {row}: `{column}` value {value:?} has no bucket")]
    UnmappedCategory {
        column: &'static str,
        value: String,
        row: usize,
    },
    /// A category seen at transform time that was never seen during fit
    #[error("row {row}: `{column}` value {value:?} was not seen while fitting the encoder")]
    UnknownCategory {
        column: &'static str,
        value: String,
        row: usize,
    },
    /// The encoder was used before being fitted
    #[error(transparent)]
    Model(#[from] ModelError),
    /// A code that does not belong to the fitted mapping
    #[error("row {row}: `{column}` code {code} does not map to any category")]
    UnknownCode {
        column: &'static str,
        code: f64,
        row: usize,
    },
}

/// Errors raised by evaluation metrics
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("{metric} is undefined: its denominator is zero")]
    ZeroDivision { metric: &'static str },
    #[error("input arrays must have the same length, predicted: {predicted}, actual: {actual}")]
    LengthMismatch { predicted: usize, actual: usize },
    #[error("input arrays must not be empty")]
    Empty,
    #[error("labels must be 0 or 1, got {0}")]
    NonBinaryLabel(f64),
}

/// Errors raised while rendering an image file
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },
    #[error("cannot plot `{column}`: {reason}")]
    InvalidData { column: String, reason: String },
}

/// Top-level error of a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error(transparent)]
    Plot(#[from] PlotError),
}
