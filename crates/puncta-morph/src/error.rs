//! Error types for puncta-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] puncta_core::Error),

    /// Invalid structuring element
    #[error("invalid structuring element: {0}")]
    InvalidSel(String),

    /// Neighbour count outside 1..=26
    #[error("invalid erosion parameter: n = {0}, expected 1..=26")]
    InvalidErosionParameter(u32),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
