use thiserror::Error;

/// Domain-level errors for model training and inference
///
/// All of these are caller-input or sequencing errors; retrying an identical
/// call is guaranteed to fail identically, so nothing here is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("Unknown model type {0:?} (expected \"Linear Regression\" or \"Gradient Boosting\")")]
    UnknownModelType(String),

    #[error("Insufficient training data: {0}")]
    InsufficientData(String),

    #[error("No trained model for {0}")]
    ModelNotTrained(String),

    #[error("Feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type ForecastResult<T> = std::result::Result<T, ForecastError>;
