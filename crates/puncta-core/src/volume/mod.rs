//! Volume - the 3D intensity container
//!
//! A `Volume` is a Z-stack of equally sized slices of unsigned samples.
//! Samples are stored as `u16`; the declared [`SampleDepth`] says how many
//! of those bits the camera actually produced and fixes the saturation value.
//!
//! # Ownership model
//!
//! `Volume` uses `Arc` for cheap cloning (shared ownership).
//! To modify sample data, convert to `VolumeMut` via [`Volume::try_into_mut`]
//! or [`Volume::to_mut`], then convert back with `Into<Volume>`.

mod project;
mod statistics;

use crate::error::{Error, Result};
use crate::image::Image;
use crate::shape::Dims3;
use std::sync::Arc;

/// Sample bit depth of an acquisition
///
/// Every sample of a volume lies in `0..=max_value()`. A sample equal to
/// `max_value()` is saturated (the sensor clipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum SampleDepth {
    /// 8-bit samples
    Bit8 = 8,
    /// 10-bit camera
    Bit10 = 10,
    /// 12-bit camera
    Bit12 = 12,
    /// 14-bit camera
    Bit14 = 14,
    /// 16-bit camera
    #[default]
    Bit16 = 16,
}

impl SampleDepth {
    /// Create `SampleDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 8, 10, 12, 14, or 16.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(SampleDepth::Bit8),
            10 => Ok(SampleDepth::Bit10),
            12 => Ok(SampleDepth::Bit12),
            14 => Ok(SampleDepth::Bit14),
            16 => Ok(SampleDepth::Bit16),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per sample.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum (saturation) value representable at this depth.
    pub fn max_value(self) -> u16 {
        ((1u32 << self.bits()) - 1) as u16
    }
}

/// Internal volume data
#[derive(Debug, Clone)]
struct VolumeData {
    dims: Dims3,
    sample_depth: SampleDepth,
    data: Vec<u16>,
}

/// Volume - 3D intensity stack (Z, Y, X)
///
/// # Examples
///
/// ```
/// use puncta_core::{Dims3, SampleDepth, Volume};
///
/// let vol = Volume::new(Dims3::new(4, 32, 32), SampleDepth::Bit16).unwrap();
/// assert_eq!(vol.depth(), 4);
/// assert_eq!(vol.get(3, 31, 31), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Volume {
    inner: Arc<VolumeData>,
}

impl Volume {
    /// Create a zero-filled volume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if any axis is 0.
    pub fn new(dims: Dims3, sample_depth: SampleDepth) -> Result<Self> {
        let dims = dims.validate()?;
        Ok(Self::wrap(VolumeData {
            dims,
            sample_depth,
            data: vec![0; dims.len()],
        }))
    }

    /// Create a volume from raster-ordered samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len()` does not match `dims`,
    /// and [`Error::SampleOutOfRange`] if any sample exceeds the bit depth.
    pub fn from_vec(dims: Dims3, sample_depth: SampleDepth, data: Vec<u16>) -> Result<Self> {
        let dims = dims.validate()?;
        if data.len() != dims.len() {
            return Err(Error::DataLength {
                expected: dims.len(),
                actual: data.len(),
            });
        }
        check_range(&data, sample_depth)?;
        Ok(Self::wrap(VolumeData {
            dims,
            sample_depth,
            data,
        }))
    }

    /// Stack equally shaped planes into a volume, first plane at z = 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] for an empty list and
    /// [`Error::PlaneShapeMismatch`] / [`Error::InvalidParameter`] if the
    /// planes disagree on shape or sample depth.
    pub fn from_slices(slices: &[Image]) -> Result<Self> {
        let first = slices.first().ok_or(Error::NullInput("no slices"))?;
        let plane = first.dims();
        let sample_depth = first.sample_depth();
        let mut data = Vec::with_capacity(plane.len() * slices.len());
        for slice in slices {
            if slice.dims() != plane {
                return Err(Error::PlaneShapeMismatch {
                    expected: plane,
                    actual: slice.dims(),
                });
            }
            if slice.sample_depth() != sample_depth {
                return Err(Error::InvalidParameter(format!(
                    "slices mix {}-bit and {}-bit samples",
                    sample_depth.bits(),
                    slice.sample_depth().bits()
                )));
            }
            data.extend_from_slice(slice.data());
        }
        let dims = Dims3::new(slices.len() as u32, plane.height, plane.width);
        Ok(Self::wrap(VolumeData {
            dims,
            sample_depth,
            data,
        }))
    }

    fn wrap(data: VolumeData) -> Self {
        Volume {
            inner: Arc::new(data),
        }
    }

    /// Get the shape.
    #[inline]
    pub fn dims(&self) -> Dims3 {
        self.inner.dims
    }

    /// Get the number of Z slices.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.inner.dims.depth
    }

    /// Get the slice height in rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.dims.height
    }

    /// Get the slice width in columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.dims.width
    }

    /// Get the declared sample bit depth.
    #[inline]
    pub fn sample_depth(&self) -> SampleDepth {
        self.inner.sample_depth
    }

    /// Get raw access to the raster-ordered samples.
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.inner.data
    }

    /// Get the number of strong references to this volume.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get a sample, or `None` if out of bounds.
    pub fn get(&self, z: u32, y: u32, x: u32) -> Option<u16> {
        let dims = self.inner.dims;
        if z >= dims.depth || y >= dims.height || x >= dims.width {
            return None;
        }
        Some(self.inner.data[dims.index(z, y, x)])
    }

    /// Get a sample without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the linear index falls outside the data.
    #[inline]
    pub fn get_unchecked(&self, z: u32, y: u32, x: u32) -> u16 {
        self.inner.data[self.inner.dims.index(z, y, x)]
    }

    /// Borrow the samples of slice `z`.
    ///
    /// # Panics
    ///
    /// Panics if `z >= depth`.
    #[inline]
    pub fn slice(&self, z: u32) -> &[u16] {
        let plane = self.inner.dims.plane_len();
        let start = z as usize * plane;
        &self.inner.data[start..start + plane]
    }

    /// Copy slice `z` into a standalone [`Image`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `z >= depth`.
    pub fn slice_image(&self, z: u32) -> Result<Image> {
        if z >= self.depth() {
            return Err(Error::IndexOutOfBounds {
                index: z as usize,
                len: self.depth() as usize,
            });
        }
        Image::from_vec(
            self.inner.dims.plane(),
            self.inner.sample_depth,
            self.slice(z).to_vec(),
        )
    }

    /// Check if two volumes have the same shape and sample depth.
    pub fn sizes_equal(&self, other: &Volume) -> bool {
        self.inner.dims == other.inner.dims && self.inner.sample_depth == other.inner.sample_depth
    }

    /// Try to convert into a mutable volume without copying.
    ///
    /// Fails (returning `self`) if other references to the data exist.
    pub fn try_into_mut(self) -> std::result::Result<VolumeMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(VolumeMut { inner: data }),
            Err(arc) => Err(Volume { inner: arc }),
        }
    }

    /// Create a mutable copy of this volume.
    pub fn to_mut(&self) -> VolumeMut {
        VolumeMut {
            inner: (*self.inner).clone(),
        }
    }
}

impl PartialEq for Volume {
    fn eq(&self, other: &Self) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }
}

impl Eq for Volume {}

/// Mutable volume
///
/// Obtained from [`Volume::try_into_mut`] or [`Volume::to_mut`]; converted
/// back with `Into<Volume>`.
#[derive(Debug)]
pub struct VolumeMut {
    inner: VolumeData,
}

impl VolumeMut {
    /// Get the shape.
    #[inline]
    pub fn dims(&self) -> Dims3 {
        self.inner.dims
    }

    /// Get the declared sample bit depth.
    #[inline]
    pub fn sample_depth(&self) -> SampleDepth {
        self.inner.sample_depth
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.inner.data
    }

    /// Get mutable access to the samples.
    ///
    /// Callers must keep every sample within the declared bit depth.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u16] {
        &mut self.inner.data
    }

    /// Get a sample, or `None` if out of bounds.
    pub fn get(&self, z: u32, y: u32, x: u32) -> Option<u16> {
        let dims = self.inner.dims;
        if z >= dims.depth || y >= dims.height || x >= dims.width {
            return None;
        }
        Some(self.inner.data[dims.index(z, y, x)])
    }

    /// Set a sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinate is outside the
    /// volume and [`Error::SampleOutOfRange`] if `value` exceeds the depth.
    pub fn set(&mut self, z: u32, y: u32, x: u32, value: u16) -> Result<()> {
        let dims = self.inner.dims;
        if z >= dims.depth || y >= dims.height || x >= dims.width {
            return Err(Error::IndexOutOfBounds {
                index: dims.index(z, y, x),
                len: dims.len(),
            });
        }
        if value > self.inner.sample_depth.max_value() {
            return Err(Error::SampleOutOfRange {
                value,
                bits: self.inner.sample_depth.bits(),
            });
        }
        self.inner.data[dims.index(z, y, x)] = value;
        Ok(())
    }
}

impl From<VolumeMut> for Volume {
    fn from(volume_mut: VolumeMut) -> Self {
        Volume::wrap(volume_mut.inner)
    }
}

pub(crate) fn check_range(data: &[u16], sample_depth: SampleDepth) -> Result<()> {
    let max = sample_depth.max_value();
    if let Some(&value) = data.iter().find(|&&v| v > max) {
        return Err(Error::SampleOutOfRange {
            value,
            bits: sample_depth.bits(),
        });
    }
    Ok(())
}
