//! Image - a single 2D plane of intensity samples
//!
//! Used for individual slices and for projections of a [`Volume`](crate::Volume).

use crate::error::{Error, Result};
use crate::shape::Dims2;
use crate::volume::{SampleDepth, check_range};

/// 2D intensity plane (Y, X)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    dims: Dims2,
    sample_depth: SampleDepth,
    data: Vec<u16>,
}

impl Image {
    /// Create a zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either axis is 0.
    pub fn new(dims: Dims2, sample_depth: SampleDepth) -> Result<Self> {
        let dims = dims.validate()?;
        Ok(Self {
            dims,
            sample_depth,
            data: vec![0; dims.len()],
        })
    }

    /// Create an image from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] on a length mismatch and
    /// [`Error::SampleOutOfRange`] if a sample exceeds the bit depth.
    pub fn from_vec(dims: Dims2, sample_depth: SampleDepth, data: Vec<u16>) -> Result<Self> {
        let dims = dims.validate()?;
        if data.len() != dims.len() {
            return Err(Error::DataLength {
                expected: dims.len(),
                actual: data.len(),
            });
        }
        check_range(&data, sample_depth)?;
        Ok(Self {
            dims,
            sample_depth,
            data,
        })
    }

    /// Get the shape.
    #[inline]
    pub fn dims(&self) -> Dims2 {
        self.dims
    }

    /// Get the height in rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// Get the width in columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.dims.width
    }

    /// Get the declared sample bit depth.
    #[inline]
    pub fn sample_depth(&self) -> SampleDepth {
        self.sample_depth
    }

    /// Get raw access to the row-major samples.
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Get a sample, or `None` if out of bounds.
    pub fn get(&self, y: u32, x: u32) -> Option<u16> {
        if y >= self.dims.height || x >= self.dims.width {
            return None;
        }
        Some(self.data[self.dims.index(y, x)])
    }

    /// Set a sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] or [`Error::SampleOutOfRange`].
    pub fn set(&mut self, y: u32, x: u32, value: u16) -> Result<()> {
        if y >= self.dims.height || x >= self.dims.width {
            return Err(Error::IndexOutOfBounds {
                index: self.dims.index(y, x),
                len: self.dims.len(),
            });
        }
        if value > self.sample_depth.max_value() {
            return Err(Error::SampleOutOfRange {
                value,
                bits: self.sample_depth.bits(),
            });
        }
        let idx = self.dims.index(y, x);
        self.data[idx] = value;
        Ok(())
    }
}
