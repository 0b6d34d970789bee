//! Error types for puncta-threshold

use thiserror::Error;

/// Errors that can occur during threshold selection
#[derive(Debug, Error)]
pub enum ThresholdError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] puncta_core::Error),

    /// Method name not one of li, otsu, triangle, yen
    #[error("unsupported threshold method: {0:?}")]
    UnsupportedMethod(String),

    /// No threshold separates the samples
    #[error("degenerate distribution: {0}")]
    DegenerateDistribution(String),
}

/// Result type for threshold operations
pub type ThresholdResult<T> = Result<T, ThresholdError>;
