//! Whole-volume statistics: saturation, range, masked extraction, rescaling

use super::{SampleDepth, Volume, VolumeData};
use crate::binary::BinaryVolume;
use crate::error::{Error, Result};

impl Volume {
    /// Number of samples equal to the saturation value of the sample depth.
    pub fn saturated_count(&self) -> usize {
        let max = self.sample_depth().max_value();
        self.data().iter().filter(|&&v| v == max).count()
    }

    /// True if any sample sits at the saturation value.
    ///
    /// A saturated acquisition clipped at the sensor, so intensities in it
    /// cannot be trusted for quantification.
    pub fn is_saturated(&self) -> bool {
        let max = self.sample_depth().max_value();
        self.data().contains(&max)
    }

    /// Smallest and largest sample.
    pub fn min_max(&self) -> (u16, u16) {
        self.data()
            .iter()
            .fold((u16::MAX, 0), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Samples at the foreground voxels of `mask`, in raster order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the mask shape differs.
    pub fn masked_values(&self, mask: &BinaryVolume) -> Result<Vec<u16>> {
        if mask.dims() != self.dims() {
            return Err(Error::ShapeMismatch {
                expected: self.dims(),
                actual: mask.dims(),
            });
        }
        Ok(self
            .data()
            .iter()
            .zip(mask.data())
            .filter(|(_, m)| **m)
            .map(|(&v, _)| v)
            .collect())
    }

    /// Linearly stretch `[min, max]` of this volume onto `[0, out.max_value()]`.
    ///
    /// Used to bring a residual volume into a displayable range. Values are
    /// truncated toward zero after scaling. A constant volume maps to zero.
    pub fn rescale_intensity(&self, out: SampleDepth) -> Volume {
        let (lo, hi) = self.min_max();
        let span = (hi - lo) as f64;
        let out_max = out.max_value() as f64;
        let data = if span == 0.0 {
            vec![0; self.data().len()]
        } else {
            self.data()
                .iter()
                .map(|&v| (((v - lo) as f64 / span) * out_max) as u16)
                .collect()
        };
        Volume::wrap(VolumeData {
            dims: self.dims(),
            sample_depth: out,
            data,
        })
    }
}
