//! Cell masks
//!
//! The cell body is found by smoothing each slice with a disk median
//! filter, optionally collapsing the stack to a maximum-intensity
//! projection, and thresholding the result globally. Puncta are far
//! smaller than the filter disk and do not survive the median, so the
//! mask follows the cytoplasm rather than the spots.

use crate::error::CountResult;
use puncta_core::{BinaryImage, BinaryVolume, Volume};
use puncta_filter::median_filter_slices;
use puncta_morph::{Footprint, open_binary, open_image};
use puncta_threshold::{ThresholdMethod, binarize, binarize_image, threshold};

/// Options for [`mask_cell`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMaskOptions {
    /// Median filter disk radius
    pub radius: u32,
    /// Threshold method applied to the filtered samples
    pub method: ThresholdMethod,
    /// Collapse to a maximum-intensity projection before thresholding
    pub project: bool,
    /// Apply a binary opening with a cross footprint to the mask
    pub open: bool,
}

impl Default for CellMaskOptions {
    fn default() -> Self {
        Self {
            radius: 10,
            method: ThresholdMethod::Otsu,
            project: false,
            open: false,
        }
    }
}

impl CellMaskOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for measuring intensities inside the cell: triangle
    /// threshold and an opened mask.
    pub fn for_intensities() -> Self {
        Self {
            method: ThresholdMethod::Triangle,
            open: true,
            ..Self::default()
        }
    }

    /// Set the median filter radius
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the threshold method
    pub fn with_method(mut self, method: ThresholdMethod) -> Self {
        self.method = method;
        self
    }

    /// Set whether to project over Z first
    pub fn with_project(mut self, project: bool) -> Self {
        self.project = project;
        self
    }

    /// Set whether to open the mask
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }
}

/// A cell mask, either per voxel or on the Z projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellMask {
    /// Mask with the shape of the source volume
    Volume(BinaryVolume),
    /// Mask on the maximum-intensity projection
    Plane(BinaryImage),
}

impl CellMask {
    /// Number of pixels or voxels inside the cell.
    pub fn count_foreground(&self) -> usize {
        match self {
            CellMask::Volume(v) => v.count_foreground(),
            CellMask::Plane(p) => p.count_foreground(),
        }
    }

    /// The per-voxel mask, if this is one.
    pub fn as_volume(&self) -> Option<&BinaryVolume> {
        match self {
            CellMask::Volume(v) => Some(v),
            CellMask::Plane(_) => None,
        }
    }

    /// The projected mask, if this is one.
    pub fn as_plane(&self) -> Option<&BinaryImage> {
        match self {
            CellMask::Plane(p) => Some(p),
            CellMask::Volume(_) => None,
        }
    }
}

/// Build a cell mask from `volume`.
///
/// Steps: per-slice median filter, optional maximum projection, global
/// threshold, `sample > threshold`, optional opening (6-connected cross in
/// 3D, 4-connected cross on a projection).
pub fn mask_cell(volume: &Volume, options: &CellMaskOptions) -> CountResult<CellMask> {
    if options.project {
        Ok(CellMask::Plane(mask_projection(volume, options)?))
    } else {
        Ok(CellMask::Volume(mask_volume(volume, options)?))
    }
}

/// Per-voxel cell mask, ignoring `options.project`.
pub fn mask_volume(volume: &Volume, options: &CellMaskOptions) -> CountResult<BinaryVolume> {
    let smoothed = median_filter_slices(volume, options.radius)?;
    let t = threshold(smoothed.data(), options.method)?;
    let mut mask = binarize(&smoothed, t)?;
    if options.open {
        mask = open_binary(&mask, &Footprint::cross_3d())?;
    }
    log::debug!(
        "cell mask: {} threshold {t:.1}, {} voxels",
        options.method,
        mask.count_foreground()
    );
    Ok(mask)
}

/// Cell mask on the maximum projection, ignoring `options.project`.
pub fn mask_projection(volume: &Volume, options: &CellMaskOptions) -> CountResult<BinaryImage> {
    let smoothed = median_filter_slices(volume, options.radius)?;
    let projection = smoothed.max_project()?;
    let t = threshold(projection.data(), options.method)?;
    let mut mask = binarize_image(&projection, t)?;
    if options.open {
        mask = open_image(&mask, &Footprint::cross_2d())?;
    }
    log::debug!(
        "projected cell mask: {} threshold {t:.1}, {} pixels",
        options.method,
        mask.count_foreground()
    );
    Ok(mask)
}
