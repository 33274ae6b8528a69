//! Error types for the circle-eval library.

use thiserror::Error;

/// Result type for circle-eval operations.
pub type Result<T> = std::result::Result<T, CircleEvalError>;

/// Boxed error returned by a detector collaborator.
pub type DetectorError = Box<dyn std::error::Error + Send + Sync>;

/// Error types that can occur during detector evaluation.
#[derive(Error, Debug)]
pub enum CircleEvalError {
    /// A circle with a non-positive radius or non-finite coordinates reached a metric.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Ground-truth set is empty where a metric needs at least one reference circle.
    #[error("Empty ground truth: {0}")]
    EmptyGroundTruth(String),

    /// Prediction set is empty where a metric divides by the prediction count.
    #[error("Empty predictions: {0}")]
    EmptyPredictions(String),

    /// Malformed or schema-violating annotation file.
    #[error("Annotation parse error: {0}")]
    AnnotationParse(String),

    /// Error raised by the detector collaborator, passed through untouched.
    #[error("Detector failure: {0}")]
    DetectorFailure(#[source] DetectorError),

    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid overlap threshold.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Empty dataset provided.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Image and annotation sequences do not pair up.
    #[error("Dataset mismatch: {0}")]
    DatasetMismatch(String),

    /// Invalid evaluation configuration.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
