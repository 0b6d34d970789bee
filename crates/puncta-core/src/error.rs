//! Error types for puncta-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use crate::shape::{Dims2, Dims3};
use thiserror::Error;

/// puncta-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid volume dimensions
    #[error("invalid volume dimensions: {depth}x{height}x{width}")]
    InvalidDimension { depth: u32, height: u32, width: u32 },

    /// Invalid sample bit depth
    #[error("invalid sample depth: {0} bits")]
    InvalidDepth(u32),

    /// Sample value larger than the declared bit depth allows
    #[error("sample value {value} exceeds the {bits}-bit range")]
    SampleOutOfRange { value: u16, bits: u32 },

    /// Backing data does not match the declared shape
    #[error("data length mismatch: expected {expected} samples, got {actual}")]
    DataLength { expected: usize, actual: usize },

    /// Two volumes that must be aligned voxel for voxel have different shapes
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: Dims3, actual: Dims3 },

    /// Two planes that must be aligned pixel for pixel have different shapes
    #[error("plane shape mismatch: expected {expected}, got {actual}")]
    PlaneShapeMismatch { expected: Dims2, actual: Dims2 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Empty input where at least one sample is required
    #[error("null or empty input: {0}")]
    NullInput(&'static str),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for puncta-core operations
pub type Result<T> = std::result::Result<T, Error>;
