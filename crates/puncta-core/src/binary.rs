//! Binary (boolean) volumes and planes
//!
//! `true` marks a foreground (candidate) sample. Binary data is produced
//! and consumed within one pipeline run, so unlike [`Volume`](crate::Volume)
//! these are plain owned buffers.

use crate::error::{Error, Result};
use crate::shape::{Dims2, Dims3};

/// 3D boolean mask, same shape class as a volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryVolume {
    dims: Dims3,
    data: Vec<bool>,
}

impl BinaryVolume {
    /// Create an all-background volume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if any axis is 0.
    pub fn new(dims: Dims3) -> Result<Self> {
        let dims = dims.validate()?;
        Ok(Self {
            dims,
            data: vec![false; dims.len()],
        })
    }

    /// Create a binary volume from raster-ordered flags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len()` does not match `dims`.
    pub fn from_vec(dims: Dims3, data: Vec<bool>) -> Result<Self> {
        let dims = dims.validate()?;
        if data.len() != dims.len() {
            return Err(Error::DataLength {
                expected: dims.len(),
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Build a binary volume by evaluating `f(z, y, x)` at every voxel.
    pub fn from_fn(dims: Dims3, mut f: impl FnMut(u32, u32, u32) -> bool) -> Result<Self> {
        let dims = dims.validate()?;
        let data = (0..dims.len())
            .map(|i| {
                let (z, y, x) = dims.coords(i);
                f(z, y, x)
            })
            .collect();
        Ok(Self { dims, data })
    }

    /// Get the shape.
    #[inline]
    pub fn dims(&self) -> Dims3 {
        self.dims
    }

    /// Get raw access to the raster-ordered flags.
    #[inline]
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Get mutable access to the flags.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [bool] {
        &mut self.data
    }

    /// Get a flag, or `None` if out of bounds.
    pub fn get(&self, z: u32, y: u32, x: u32) -> Option<bool> {
        if !self.dims.contains(z as i64, y as i64, x as i64) {
            return None;
        }
        Some(self.data[self.dims.index(z, y, x)])
    }

    /// Set a flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinate is outside.
    pub fn set(&mut self, z: u32, y: u32, x: u32, value: bool) -> Result<()> {
        if !self.dims.contains(z as i64, y as i64, x as i64) {
            return Err(Error::IndexOutOfBounds {
                index: self.dims.index(z, y, x),
                len: self.dims.len(),
            });
        }
        let idx = self.dims.index(z, y, x);
        self.data[idx] = value;
        Ok(())
    }

    /// Count foreground voxels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// True if no voxel is foreground.
    pub fn is_all_background(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// True if every foreground voxel of `self` is also foreground in `other`.
    ///
    /// Volumes of different shapes are never subsets of each other.
    pub fn is_subset_of(&self, other: &BinaryVolume) -> bool {
        self.dims == other.dims
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| !a || b)
    }

    /// Iterate over the (z, y, x) coordinates of foreground voxels.
    pub fn foreground(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| self.dims.coords(i))
    }
}

/// 2D boolean mask, e.g. a projected cell footprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    dims: Dims2,
    data: Vec<bool>,
}

impl BinaryImage {
    /// Create an all-background plane.
    pub fn new(dims: Dims2) -> Result<Self> {
        let dims = dims.validate()?;
        Ok(Self {
            dims,
            data: vec![false; dims.len()],
        })
    }

    /// Create a binary plane from row-major flags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len()` does not match `dims`.
    pub fn from_vec(dims: Dims2, data: Vec<bool>) -> Result<Self> {
        let dims = dims.validate()?;
        if data.len() != dims.len() {
            return Err(Error::DataLength {
                expected: dims.len(),
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Get the shape.
    #[inline]
    pub fn dims(&self) -> Dims2 {
        self.dims
    }

    /// Get raw access to the row-major flags.
    #[inline]
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Get a flag, or `None` if out of bounds.
    pub fn get(&self, y: u32, x: u32) -> Option<bool> {
        if y >= self.dims.height || x >= self.dims.width {
            return None;
        }
        Some(self.data[self.dims.index(y, x)])
    }

    /// Set a flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinate is outside.
    pub fn set(&mut self, y: u32, x: u32, value: bool) -> Result<()> {
        if y >= self.dims.height || x >= self.dims.width {
            return Err(Error::IndexOutOfBounds {
                index: self.dims.index(y, x),
                len: self.dims.len(),
            });
        }
        let idx = self.dims.index(y, x);
        self.data[idx] = value;
        Ok(())
    }

    /// Count foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}
