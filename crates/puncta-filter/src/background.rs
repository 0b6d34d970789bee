//! Median background subtraction
//!
//! The background of each Z-slice is estimated with a large disk median
//! filter and subtracted from the slice. Structures much smaller than the
//! disk do not move the median, so they remain in the residual ("spot")
//! volume while smooth cytoplasmic signal is removed.

use crate::FilterResult;
use crate::rank::median_filter_slices;
use puncta_core::Volume;

/// Subtract the per-slice disk median of radius `radius` from `volume`.
///
/// The difference is taken in a signed intermediate and negative values
/// are clamped to 0, so a sample darker than its local median never wraps
/// around to a large unsigned value. The result has the shape and sample
/// depth of the input.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`](crate::FilterError::InvalidParameters)
/// if `radius` is 0.
pub fn subtract_background(volume: &Volume, radius: u32) -> FilterResult<Volume> {
    let background = median_filter_slices(volume, radius)?;

    let mut out = volume.to_mut();
    let mut clamped = 0usize;
    for (v, &bg) in out.data_mut().iter_mut().zip(background.data()) {
        let diff = *v as i32 - bg as i32;
        if diff < 0 {
            clamped += 1;
        }
        *v = diff.max(0) as u16;
    }
    log::debug!(
        "background subtraction (radius {radius}) on {}: {clamped} samples clamped to 0",
        volume.dims()
    );

    Ok(out.into())
}
