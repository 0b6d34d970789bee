//! Patch counting pipeline
//!
//! One run takes a raw fluorescence volume (and optionally a second
//! channel that outlines the cell) through:
//!
//! 1. saturation check
//! 2. median background subtraction, giving the spot volume
//! 3. global threshold on the spot volume, or on its part inside the cell
//! 4. neighbour-count erosion, single pass or until stable
//! 5. connected-component labelling
//! 6. cross-section area from the projected cell mask, median filtered
//!    with the background radius
//!
//! Every choice that differed between earlier scripts (threshold domain,
//! method, looping) is a field of [`PatchCountOptions`].

use crate::area::estimate_area_with;
use crate::error::{CountError, CountResult};
use crate::mask::{CellMaskOptions, mask_volume};
use puncta_core::{BinaryVolume, Connectivity, Volume};
use puncta_filter::subtract_background;
use puncta_morph::{ErosionOptions, erode};
use puncta_region::{LabelMap, label_and_count};
use puncta_threshold::{ThresholdMethod, binarize, threshold};

/// Options for [`count_patches`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchCountOptions {
    /// Disk radius of the background median filter
    pub median_radius: u32,
    /// Neighbour-count erosion settings
    pub erosion: ErosionOptions,
    /// Adjacency used to count patches
    pub connectivity: Connectivity,
    /// Threshold method for the spot volume
    pub method: ThresholdMethod,
    /// Threshold only on spot samples inside the cell mask
    pub use_mask_for_threshold: bool,
    /// Cell mask settings for the threshold domain; the area mask takes
    /// its method and opening but uses `median_radius`
    pub mask: CellMaskOptions,
}

impl Default for PatchCountOptions {
    fn default() -> Self {
        Self {
            median_radius: 10,
            erosion: ErosionOptions::new(3),
            connectivity: Connectivity::Eighteen,
            method: ThresholdMethod::Yen,
            use_mask_for_threshold: false,
            mask: CellMaskOptions::default(),
        }
    }
}

impl PatchCountOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background median radius
    pub fn with_median_radius(mut self, radius: u32) -> Self {
        self.median_radius = radius;
        self
    }

    /// Set the erosion neighbour count (clamped to 1..=26)
    pub fn with_erosion_n(mut self, n: u32) -> Self {
        self.erosion = self.erosion.with_n(n);
        self
    }

    /// Repeat erosion until a pass removes nothing
    pub fn with_loop(mut self, until_stable: bool) -> Self {
        self.erosion = self.erosion.with_until_stable(until_stable);
        self
    }

    /// Cap the number of erosion passes in loop mode
    pub fn with_max_passes(mut self, max_passes: u32) -> Self {
        self.erosion = self.erosion.with_max_passes(max_passes);
        self
    }

    /// Set the labelling connectivity
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the spot threshold method
    pub fn with_method(mut self, method: ThresholdMethod) -> Self {
        self.method = method;
        self
    }

    /// Threshold on the cell interior only
    pub fn with_mask_for_threshold(mut self, use_mask: bool) -> Self {
        self.use_mask_for_threshold = use_mask;
        self
    }

    /// Set the cell mask options
    pub fn with_mask(mut self, mask: CellMaskOptions) -> Self {
        self.mask = mask;
        self
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct PatchReport {
    /// Number of patches after erosion
    pub count: u32,
    /// Cross-section area in pixels
    pub area: usize,
    /// Threshold applied to the spot volume
    pub threshold: f64,
    /// Erosion passes run
    pub erosion_passes: u32,
    /// Whether erosion ended on a pass that removed nothing
    pub erosion_converged: bool,
    /// Background-subtracted volume
    pub spot: Volume,
    /// Thresholded spot volume
    pub binary: BinaryVolume,
    /// Eroded binary volume
    pub eroded: BinaryVolume,
    /// Patch labels of the eroded volume
    pub labels: LabelMap,
}

/// Reject a volume that contains its depth's saturation value.
///
/// # Errors
///
/// Returns [`CountError::SaturatedInput`], which is skippable.
pub fn check_saturation(volume: &Volume) -> CountResult<()> {
    let count = volume.saturated_count();
    if count > 0 {
        let depth = volume.sample_depth();
        log::debug!(
            "skipping saturated volume {}: {count} clipped samples",
            volume.dims()
        );
        return Err(CountError::SaturatedInput {
            depth,
            max_value: depth.max_value(),
            count,
        });
    }
    Ok(())
}

fn check_mask_channel(volume: &Volume, mask_channel: Option<&Volume>) -> CountResult<()> {
    match mask_channel {
        Some(channel) if channel.dims() != volume.dims() => {
            Err(puncta_core::Error::ShapeMismatch {
                expected: volume.dims(),
                actual: channel.dims(),
            }
            .into())
        }
        _ => Ok(()),
    }
}

/// Count the patches in `volume` and measure its cross-section area.
///
/// `mask_channel`, when given, replaces `volume` as the source of the cell
/// mask for the threshold domain. The area is always measured on `volume`,
/// with the background median radius.
///
/// # Errors
///
/// - [`CountError::SaturatedInput`] if `volume` contains clipped samples
/// - [`CountError::Core`] with a shape mismatch if `mask_channel` differs
///   in shape from `volume`; both checks run before any processing
/// - threshold, filter, morphology and labelling errors of each stage
pub fn count_patches(
    volume: &Volume,
    mask_channel: Option<&Volume>,
    options: &PatchCountOptions,
) -> CountResult<PatchReport> {
    check_saturation(volume)?;
    check_mask_channel(volume, mask_channel)?;

    let spot = subtract_background(volume, options.median_radius)?;

    let t = if options.use_mask_for_threshold {
        let source = mask_channel.unwrap_or(volume);
        let mask = mask_volume(source, &options.mask)?;
        let inside = spot.masked_values(&mask)?;
        log::debug!("thresholding {} spot samples inside the cell", inside.len());
        threshold(&inside, options.method)?
    } else {
        threshold(spot.data(), options.method)?
    };

    let binary = binarize(&spot, t)?;
    let outcome = erode(&binary, &options.erosion)?;
    let (labels, count) = label_and_count(&outcome.volume, options.connectivity)?;
    let area = estimate_area_with(volume, &options.mask.with_radius(options.median_radius))?;

    log::debug!(
        "{} threshold {t:.2}: {} candidate voxels, {} after {} erosion pass(es)",
        options.method,
        binary.count_foreground(),
        outcome.volume.count_foreground(),
        outcome.passes
    );
    log::debug!("{count} patches, area {area}");

    Ok(PatchReport {
        count,
        area,
        threshold: t,
        erosion_passes: outcome.passes,
        erosion_converged: outcome.converged,
        spot,
        binary,
        eroded: outcome.volume,
        labels,
    })
}
