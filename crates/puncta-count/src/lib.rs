//! puncta-count - Patch counting and cell measurements
//!
//! Ties the stages of the other crates together:
//!
//! - [`mask_cell`] - cell mask from a median-filtered, thresholded volume
//! - [`estimate_area`] - cross-section area of the projected mask
//! - [`count_patches`] - background subtraction, threshold, erosion and
//!   labelling in one run, returning a [`PatchReport`]
//! - [`masked_intensities`] / [`exceedance_curve`] - intensity measurements
//!   inside the cell
//!
//! # Example
//!
//! ```
//! use puncta_core::{Dims3, SampleDepth, Volume};
//! use puncta_count::{PatchCountOptions, count_patches};
//! use puncta_threshold::ThresholdMethod;
//!
//! // 11x11 cell with a 3x3 punctum in the middle slice
//! let dims = Dims3::new(3, 15, 15);
//! let data = (0..dims.len())
//!     .map(|i| {
//!         let (z, y, x) = dims.coords(i);
//!         let cell = (2..13).contains(&y) && (2..13).contains(&x);
//!         let punctum = z == 1 && (6..9).contains(&y) && (6..9).contains(&x);
//!         match (cell, punctum) {
//!             (_, true) => 3400,
//!             (true, false) => 400,
//!             _ => 100,
//!         }
//!     })
//!     .collect();
//! let volume = Volume::from_vec(dims, SampleDepth::Bit16, data).unwrap();
//!
//! let options = PatchCountOptions::new()
//!     .with_median_radius(3)
//!     .with_method(ThresholdMethod::Otsu);
//! let report = count_patches(&volume, None, &options).unwrap();
//! assert_eq!(report.threshold, 300.0);
//! assert_eq!(report.count, 1);
//! // The radius-3 median rounds 3 pixels off each corner of the square
//! assert_eq!(report.area, 109);
//! ```

pub mod area;
mod error;
pub mod mask;
pub mod pipeline;
pub mod values;

pub use area::{estimate_area, estimate_area_with};
pub use error::{CountError, CountResult};
pub use mask::{CellMask, CellMaskOptions, mask_cell, mask_projection, mask_volume};
pub use pipeline::{PatchCountOptions, PatchReport, check_saturation, count_patches};
pub use values::{
    ExceedanceOptions, MaskedIntensities, exceedance_curve, masked_intensities,
    rescale_by_integral,
};
