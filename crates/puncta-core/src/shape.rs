//! Volume and plane shapes
//!
//! Axes are ordered Z, Y, X throughout. Samples are stored in raster
//! order: X varies fastest, then Y, then Z.

use crate::error::{Error, Result};
use std::fmt;

/// Shape of a 3D volume (slices x rows x columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims3 {
    /// Number of Z slices
    pub depth: u32,
    /// Rows per slice
    pub height: u32,
    /// Columns per slice
    pub width: u32,
}

impl Dims3 {
    /// Create a shape. No validation; see [`Dims3::validate`].
    pub const fn new(depth: u32, height: u32, width: u32) -> Self {
        Self {
            depth,
            height,
            width,
        }
    }

    /// Reject shapes with a zero extent on any axis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if any axis is 0.
    pub fn validate(self) -> Result<Self> {
        if self.depth == 0 || self.height == 0 || self.width == 0 {
            return Err(Error::InvalidDimension {
                depth: self.depth,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self)
    }

    /// Total number of voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.depth as usize * self.height as usize * self.width as usize
    }

    /// True if the shape holds no voxels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of one Z slice.
    #[inline]
    pub fn plane(&self) -> Dims2 {
        Dims2::new(self.height, self.width)
    }

    /// Number of voxels in one Z slice.
    #[inline]
    pub fn plane_len(&self) -> usize {
        self.height as usize * self.width as usize
    }

    /// Linear index of voxel (z, y, x). Does not bounds-check.
    #[inline]
    pub fn index(&self, z: u32, y: u32, x: u32) -> usize {
        (z as usize * self.height as usize + y as usize) * self.width as usize + x as usize
    }

    /// Inverse of [`Dims3::index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (u32, u32, u32) {
        let plane = self.plane_len();
        let z = index / plane;
        let rem = index % plane;
        let y = rem / self.width as usize;
        let x = rem % self.width as usize;
        (z as u32, y as u32, x as u32)
    }

    /// True if the signed coordinate lies inside the volume.
    #[inline]
    pub fn contains(&self, z: i64, y: i64, x: i64) -> bool {
        z >= 0
            && y >= 0
            && x >= 0
            && z < self.depth as i64
            && y < self.height as i64
            && x < self.width as i64
    }

    /// Shape grown by `border` voxels on both sides of every axis.
    #[inline]
    pub fn padded(&self, border: u32) -> Self {
        Self::new(
            self.depth + 2 * border,
            self.height + 2 * border,
            self.width + 2 * border,
        )
    }
}

impl fmt::Display for Dims3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.depth, self.height, self.width)
    }
}

/// Shape of a 2D plane (rows x columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims2 {
    /// Number of rows
    pub height: u32,
    /// Number of columns
    pub width: u32,
}

impl Dims2 {
    /// Create a shape. No validation; see [`Dims2::validate`].
    pub const fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Reject shapes with a zero extent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] (with depth 1) if either axis is 0.
    pub fn validate(self) -> Result<Self> {
        if self.height == 0 || self.width == 0 {
            return Err(Error::InvalidDimension {
                depth: 1,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self)
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.height as usize * self.width as usize
    }

    /// True if the shape holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index of pixel (y, x). Does not bounds-check.
    #[inline]
    pub fn index(&self, y: u32, x: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl fmt::Display for Dims2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}
