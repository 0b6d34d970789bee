//! Error types for puncta-count
//!
//! Wraps the errors of every stage so a pipeline run reports a single type.

use puncta_core::SampleDepth;
use thiserror::Error;

/// Errors that can occur while counting patches or measuring a cell
#[derive(Debug, Error)]
pub enum CountError {
    /// Core library error (shape mismatch, invalid dimensions, ...)
    #[error("core error: {0}")]
    Core(#[from] puncta_core::Error),

    /// Threshold selection error
    #[error("threshold error: {0}")]
    Threshold(#[from] puncta_threshold::ThresholdError),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] puncta_morph::MorphError),

    /// Filtering error
    #[error("filter error: {0}")]
    Filter(#[from] puncta_filter::FilterError),

    /// Labelling error
    #[error("region error: {0}")]
    Region(#[from] puncta_region::RegionError),

    /// The volume contains clipped samples and cannot be measured
    #[error("saturated input: {count} samples at the {depth:?} maximum {max_value}")]
    SaturatedInput {
        /// Declared sample depth
        depth: SampleDepth,
        /// Saturation value for that depth
        max_value: u16,
        /// Number of saturated samples
        count: usize,
    },

    /// The cell mask selected no pixels
    #[error("empty cell mask")]
    EmptyMask,
}

impl CountError {
    /// True for errors that reject one input without indicating a fault,
    /// so a batch driver may log the volume and move on.
    pub fn is_skippable(&self) -> bool {
        matches!(self, CountError::SaturatedInput { .. })
    }
}

/// Result type for counting operations
pub type CountResult<T> = Result<T, CountError>;
