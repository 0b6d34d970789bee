//! Integer intensity histograms
//!
//! One bin per integer value between the smallest and the largest sample,
//! so bin `i` counts samples equal to `min + i`. Threshold selection works
//! on this representation rather than on the raw samples.

use crate::error::{Error, Result};

/// Exact histogram of unsigned samples over `[min, max]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    min: u16,
    counts: Vec<u64>,
    total: u64,
}

impl Histogram {
    /// Build a histogram from a sample slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] if `samples` is empty.
    pub fn from_samples(samples: &[u16]) -> Result<Self> {
        Self::from_iter_checked(samples.iter().copied())
    }

    /// Build a histogram from any sample iterator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] if the iterator yields nothing.
    pub fn from_iter_checked(samples: impl IntoIterator<Item = u16> + Clone) -> Result<Self> {
        let (min, max) = samples
            .clone()
            .into_iter()
            .fold(None, |acc: Option<(u16, u16)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .ok_or(Error::NullInput("histogram samples"))?;

        let mut counts = vec![0u64; (max - min) as usize + 1];
        let mut total = 0u64;
        for v in samples {
            counts[(v - min) as usize] += 1;
            total += 1;
        }
        Ok(Self { min, counts, total })
    }

    /// Smallest sample value (value of bin 0).
    #[inline]
    pub fn min(&self) -> u16 {
        self.min
    }

    /// Largest sample value (value of the last bin).
    #[inline]
    pub fn max(&self) -> u16 {
        self.min + (self.counts.len() - 1) as u16
    }

    /// Per-bin counts.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false: a histogram holds at least one bin.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of samples.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Intensity represented by bin `bin`.
    #[inline]
    pub fn value(&self, bin: usize) -> f64 {
        self.min as f64 + bin as f64
    }

    /// True if every sample has the same value.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.counts.len() == 1
    }

    /// Mean intensity.
    pub fn mean(&self) -> f64 {
        let sum: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| self.value(i) * c as f64)
            .sum();
        sum / self.total as f64
    }

    /// Normalised bin probabilities (sum to 1).
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }
}
