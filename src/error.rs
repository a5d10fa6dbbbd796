//! Error types for diagram distance computation.

use thiserror::Error;

/// Errors raised while building diagrams or computing distances.
///
/// Numeric guards inside the evaluators (the arccos clamp and the zero-sum
/// density normalization) are recovered silently and never show up here.
#[derive(Debug, Error)]
pub enum MetricError {
    /// A diagram array is not an `n x 2` point sequence.
    #[error("Invalid diagram shape: expected n x 2, got {rows} x {cols}")]
    InvalidShape { rows: usize, cols: usize },

    /// A diagram point has an infinite or NaN coordinate (essential point).
    #[error("Point {index} has a non-finite coordinate; filter essential points first")]
    NonFinitePoint { index: usize },

    /// A diagram point is born after it dies.
    #[error("Point {index} has birth {birth} > death {death}")]
    InvertedPoint { index: usize, birth: f64, death: f64 },

    /// Unknown metric name.
    #[error("Unknown metric: {0:?}")]
    UnknownMetric(String),

    /// A metric parameter is out of its domain.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Two projected diagrams were built on different direction sets.
    #[error("Projection direction mismatch: {left} vs {right} directions")]
    DirectionMismatch { left: usize, right: usize },

    /// The exact backend required by a metric is not available.
    #[error("Metric {metric} requires an unavailable backend: {reason}")]
    DependencyMissing { metric: String, reason: String },

    /// Failure reported by an exact backend.
    #[error("Backend error: {0}")]
    Backend(String),

    /// An estimator was asked to transform before being fitted.
    #[error("Estimator is not fitted; call fit() first")]
    NotFitted,

    /// Array shape error.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for metric operations.
pub type Result<T> = std::result::Result<T, MetricError>;
