//! puncta-morph - Morphological operations on binary volumes
//!
//! This crate provides:
//!
//! - Flat structuring elements ([`Footprint`]): disks and crosses
//! - Classic binary erosion, dilation and opening of volumes and planes
//! - Neighbour-count erosion: a voxel survives when at least `n` of its
//!   26 neighbours are foreground, in a single pass or repeated until
//!   nothing more is removed

pub mod binary;
mod error;
pub mod erosion;
pub mod sel;

pub use binary::{dilate_binary, dilate_image, erode_binary, erode_image, open_binary, open_image};
pub use error::{MorphError, MorphResult};
pub use erosion::{
    ErosionOptions, ErosionOutcome, NeighborCount, erode, erode_count, erode_neighbors,
    neighbor_counts,
};
pub use sel::Footprint;
