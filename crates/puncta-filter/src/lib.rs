//! puncta-filter - Rank filtering and background removal
//!
//! This crate provides:
//!
//! - Rank (order-statistic) filters over a flat footprint, applied to a
//!   plane or to every Z-slice of a volume independently
//! - Median background subtraction, which leaves the small bright
//!   structures a large median window cannot follow

pub mod background;
mod error;
pub mod rank;

pub use background::subtract_background;
pub use error::{FilterError, FilterResult};
pub use rank::{
    median_filter_image, median_filter_slices, rank_filter_image, rank_filter_slices,
};
