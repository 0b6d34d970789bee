//! puncta-threshold - Global threshold selection
//!
//! Picks a single intensity cutoff from the histogram of a sample
//! collection and binarizes volumes and planes against it:
//!
//! - [`ThresholdMethod`] - Li, Otsu, Triangle, Yen
//! - [`threshold`] / [`threshold_histogram`] - select a cutoff
//! - [`binarize`] / [`binarize_image`] - foreground is `sample > threshold`
//!
//! # Example
//!
//! ```
//! use puncta_threshold::{ThresholdMethod, threshold};
//!
//! let samples = [10u16, 11, 10, 12, 200, 201, 199];
//! let t = threshold(&samples, ThresholdMethod::Otsu).unwrap();
//! assert!(t >= 12.0 && t < 199.0);
//! ```

pub mod binarize;
mod error;
pub mod global;
pub mod method;

pub use binarize::{binarize, binarize_image};
pub use error::{ThresholdError, ThresholdResult};
pub use global::{li, otsu, threshold, threshold_histogram, triangle, yen};
pub use method::ThresholdMethod;
