//! Cross-section area estimate

use crate::error::CountResult;
use crate::mask::{CellMaskOptions, mask_cell};
use puncta_core::Volume;

/// Estimate the cell's cross-section area in pixels.
///
/// Equivalent to [`estimate_area_with`] using the default mask options
/// with the given median radius.
pub fn estimate_area(volume: &Volume, radius: u32) -> CountResult<usize> {
    estimate_area_with(volume, &CellMaskOptions::new().with_radius(radius))
}

/// Estimate the cross-section area with explicit mask options.
///
/// The mask is always built on the maximum projection, whatever
/// `options.project` says; the area is its foreground pixel count.
pub fn estimate_area_with(volume: &Volume, options: &CellMaskOptions) -> CountResult<usize> {
    let options = options.with_project(true);
    let mask = mask_cell(volume, &options)?;
    Ok(mask.count_foreground())
}
