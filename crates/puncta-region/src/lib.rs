//! puncta-region - Connected components of binary volumes
//!
//! This crate labels the connected foreground regions ("patches") of a
//! [`BinaryVolume`](puncta_core::BinaryVolume) under 6, 18 or 26
//! connectivity and reports per-patch statistics.
//!
//! # Example
//!
//! ```
//! use puncta_core::{BinaryVolume, Connectivity, Dims3};
//! use puncta_region::label_and_count;
//!
//! let mut bv = BinaryVolume::new(Dims3::new(3, 5, 5)).unwrap();
//! bv.set(0, 0, 0, true).unwrap();
//! bv.set(2, 4, 4, true).unwrap();
//!
//! let (labels, count) = label_and_count(&bv, Connectivity::TwentySix).unwrap();
//! assert_eq!(count, 2);
//! assert_eq!(labels.get(0, 0, 0), Some(1));
//! ```

pub mod conncomp;
mod error;

pub use conncomp::{ComponentStats, LabelMap, component_stats, label_and_count, label_components};
pub use error::{RegionError, RegionResult};
