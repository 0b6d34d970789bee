//! Puncta - fluorescent patch counting for Rust
//!
//! Counts bright, compact patches (puncta) in 3D fluorescence stacks of
//! single cells and measures the cell's cross-section area.
//!
//! # Overview
//!
//! - Volumes with a declared camera bit depth and saturation checks
//! - Global thresholds (Li, Otsu, Triangle, Yen)
//! - Neighbour-count erosion and classic binary morphology
//! - Disk median filtering and background subtraction
//! - 6/18/26-connected component labelling
//! - The counting pipeline, cell masks and area estimates
//!
//! # Example
//!
//! ```
//! use puncta::count::{PatchCountOptions, count_patches};
//! use puncta::{Dims3, SampleDepth, Volume};
//!
//! // Single slice: a 10x10 cell with a bright 3x3 punctum at its centre
//! let dims = Dims3::new(1, 16, 16);
//! let data = (0..dims.len())
//!     .map(|i| {
//!         let (_, y, x) = dims.coords(i);
//!         let cell = (3..13).contains(&y) && (3..13).contains(&x);
//!         let punctum = (7..10).contains(&y) && (7..10).contains(&x);
//!         match (cell, punctum) {
//!             (_, true) => 3400,
//!             (true, false) => 400,
//!             _ => 100,
//!         }
//!     })
//!     .collect();
//! let volume = Volume::from_vec(dims, SampleDepth::Bit12, data).unwrap();
//!
//! let options = PatchCountOptions::new().with_median_radius(3);
//! let report = count_patches(&volume, None, &options).unwrap();
//! assert_eq!(report.spot.get(0, 8, 8), Some(3000));
//! assert_eq!(report.count, 1);
//! assert_eq!(report.area, 88);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use puncta_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use puncta_count as count;
pub use puncta_filter as filter;
pub use puncta_morph as morph;
pub use puncta_region as region;
pub use puncta_threshold as threshold;
