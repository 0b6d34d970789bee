//! puncta-core - Basic data structures for patch counting
//!
//! This crate provides the data model shared by every stage of the
//! detection pipeline:
//!
//! - [`Volume`] / [`VolumeMut`] - 3D intensity stack with a declared [`SampleDepth`]
//! - [`Image`] - a single 2D plane (slice or projection)
//! - [`BinaryVolume`] / [`BinaryImage`] - boolean masks
//! - [`Dims3`] / [`Dims2`] - shapes, ordered Z, Y, X
//! - [`NEIGHBOR_OFFSETS`] / [`Connectivity`] - 3×3×3 neighbourhoods
//! - [`Histogram`] - exact integer histogram used for threshold selection
//! - [`IntensitySummary`] - mean, median, spread and skew of masked intensities

pub mod binary;
pub mod error;
pub mod histogram;
pub mod image;
pub mod neighborhood;
pub mod shape;
pub mod stats;
pub mod volume;

pub use binary::{BinaryImage, BinaryVolume};
pub use error::{Error, Result};
pub use histogram::Histogram;
pub use image::Image;
pub use neighborhood::{Connectivity, NEIGHBOR_COUNT, NEIGHBOR_OFFSETS, Offset3};
pub use shape::{Dims2, Dims3};
pub use stats::{IntensitySummary, rescale_unit};
pub use volume::{SampleDepth, Volume, VolumeMut};
