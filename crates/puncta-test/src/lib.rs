//! puncta-test - Regression test framework for puncta
//!
//! Tests are organised the same way in every crate: a `tests/<name>_reg.rs`
//! file creates a [`RegParams`], records numbered checks against it and
//! asserts on [`RegParams::cleanup`]. Failing checks are collected and
//! reported together instead of stopping at the first mismatch.
//!
//! # Usage
//!
//! ```ignore
//! use puncta_test::RegParams;
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(2.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Inputs are synthetic: [`synth`] builds the volumes the tests run on.

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::RegParams;
