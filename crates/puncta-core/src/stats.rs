//! Summary statistics over flat sample collections

use crate::error::{Error, Result};

/// Mean, median and spread of a set of intensities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensitySummary {
    /// Number of samples
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Median; the mean of the two middle values for an even count
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl IntensitySummary {
    /// Summarise `samples`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] if `samples` is empty.
    pub fn from_samples(samples: &[u16]) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::NullInput("intensity samples"));
        }
        let n = samples.len() as f64;
        let mean = samples.iter().map(|&v| v as f64).sum::<f64>() / n;
        let variance = samples
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        } else {
            sorted[mid] as f64
        };

        Ok(Self {
            count: samples.len(),
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }

    /// Nonparametric skew `(mean - median) / std_dev`.
    ///
    /// Positive when a bright tail pulls the mean above the median. `None`
    /// if all samples are equal.
    pub fn skew(&self) -> Option<f64> {
        if self.std_dev == 0.0 {
            return None;
        }
        Some((self.mean - self.median) / self.std_dev)
    }
}

/// Rescale samples so that the smallest maps to 0.0 and the largest to 1.0.
///
/// # Errors
///
/// Returns [`Error::NullInput`] for no samples and
/// [`Error::InvalidParameter`] if all samples are equal.
pub fn rescale_unit(samples: &[u16]) -> Result<Vec<f64>> {
    let lo = *samples.iter().min().ok_or(Error::NullInput("samples"))?;
    let hi = *samples.iter().max().ok_or(Error::NullInput("samples"))?;
    if lo == hi {
        return Err(Error::InvalidParameter(format!(
            "cannot rescale constant samples ({lo})"
        )));
    }
    let span = (hi - lo) as f64;
    Ok(samples.iter().map(|&v| (v - lo) as f64 / span).collect())
}
