//! Intensities inside the cell
//!
//! Two measurements on the cell interior that do not involve patch
//! detection: the flat list of masked intensities with a summary, and the
//! exceedance curve `P(I >= i)` of the projected cell.

use crate::error::{CountError, CountResult};
use crate::mask::{CellMaskOptions, mask_projection, mask_volume};
use crate::pipeline::check_saturation;
use puncta_core::{IntensitySummary, SampleDepth, Volume, rescale_unit};

/// Intensities of the voxels inside a cell mask, in raster order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedIntensities {
    values: Vec<u16>,
}

impl MaskedIntensities {
    /// Raw sample values
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the mask selected nothing
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean, median and standard deviation.
    pub fn summary(&self) -> CountResult<IntensitySummary> {
        Ok(IntensitySummary::from_samples(&self.values)?)
    }

    /// Values stretched so the smallest is 0.0 and the largest 1.0.
    pub fn rescaled(&self) -> CountResult<Vec<f64>> {
        Ok(rescale_unit(&self.values)?)
    }
}

/// Collect the intensities of `volume` inside its cell mask.
///
/// The mask is built per voxel from `mask_channel` if given, otherwise from
/// `volume` itself; `options.project` is ignored.
///
/// # Errors
///
/// - [`CountError::SaturatedInput`] if `volume` contains clipped samples
/// - a shape mismatch if `mask_channel` differs in shape from `volume`
pub fn masked_intensities(
    volume: &Volume,
    mask_channel: Option<&Volume>,
    options: &CellMaskOptions,
) -> CountResult<MaskedIntensities> {
    check_saturation(volume)?;
    let source = match mask_channel {
        Some(channel) if channel.dims() != volume.dims() => {
            return Err(puncta_core::Error::ShapeMismatch {
                expected: volume.dims(),
                actual: channel.dims(),
            }
            .into());
        }
        Some(channel) => channel,
        None => volume,
    };
    let mask = mask_volume(source, options)?;
    let values = volume.masked_values(&mask)?;
    Ok(MaskedIntensities { values })
}

/// Options for [`exceedance_curve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExceedanceOptions {
    /// Cell mask settings; the mask is always taken on the projection
    pub mask: CellMaskOptions,
    /// Stretch the volume onto the 8-bit range first
    pub eight_bit: bool,
    /// Rescale the intensity axis by the curve's integral
    pub rescale: bool,
}

impl ExceedanceOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell mask options
    pub fn with_mask(mut self, mask: CellMaskOptions) -> Self {
        self.mask = mask;
        self
    }

    /// Set whether to work on an 8-bit stretched copy
    pub fn with_eight_bit(mut self, eight_bit: bool) -> Self {
        self.eight_bit = eight_bit;
        self
    }

    /// Set whether to rescale the intensity axis
    pub fn with_rescale(mut self, rescale: bool) -> Self {
        self.rescale = rescale;
        self
    }
}

/// Probability that a cell pixel of the maximum projection is at least `i`.
///
/// Returns `(i, P(I >= i))` for every integer `i` from the smallest
/// non-zero masked intensity to the largest. The denominator is the number
/// of pixels in the projected cell mask.
///
/// # Errors
///
/// Returns [`CountError::EmptyMask`] if the mask holds no non-zero pixel.
pub fn exceedance_curve(
    volume: &Volume,
    options: &ExceedanceOptions,
) -> CountResult<Vec<(f64, f64)>> {
    let stretched;
    let volume = if options.eight_bit {
        stretched = volume.rescale_intensity(SampleDepth::Bit8);
        &stretched
    } else {
        volume
    };

    let mask = mask_projection(volume, &options.mask)?;
    let projection = volume.max_project()?;
    let inside = mask.count_foreground();

    let masked: Vec<u16> = projection
        .data()
        .iter()
        .zip(mask.data())
        .filter(|&(&v, &m)| m && v > 0)
        .map(|(&v, _)| v)
        .collect();
    let lo = *masked.iter().min().ok_or(CountError::EmptyMask)?;
    let hi = *masked.iter().max().ok_or(CountError::EmptyMask)?;

    // at_least[k] = number of masked pixels >= lo + k
    let mut at_least = vec![0u64; (hi - lo) as usize + 1];
    for &v in &masked {
        at_least[(v - lo) as usize] += 1;
    }
    for k in (0..at_least.len() - 1).rev() {
        at_least[k] += at_least[k + 1];
    }

    let total = inside as f64;
    let mut curve: Vec<(f64, f64)> = at_least
        .iter()
        .enumerate()
        .map(|(k, &n)| (lo as f64 + k as f64, n as f64 / total))
        .collect();

    if options.rescale {
        rescale_by_integral(&mut curve);
    }
    Ok(curve)
}

/// Shift the intensity axis to start at 0 and divide it by the sum of the
/// probabilities, so curves of cells with different brightness overlay.
pub fn rescale_by_integral(curve: &mut [(f64, f64)]) {
    let Some(&(first, _)) = curve.first() else {
        return;
    };
    let integral: f64 = curve.iter().map(|&(_, p)| p).sum();
    if integral == 0.0 {
        return;
    }
    for point in curve.iter_mut() {
        point.0 = (point.0 - first) / integral;
    }
}
