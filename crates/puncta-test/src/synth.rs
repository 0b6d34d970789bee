//! Synthetic volumes for tests
//!
//! Every regression test builds its input here instead of reading image
//! files, so expected counts and areas follow directly from the geometry.

use crate::error::{TestError, TestResult};
use puncta_core::{BinaryVolume, Dims3, SampleDepth, Volume};

/// Binary volume with only the listed voxels set.
pub fn binary_points(dims: Dims3, points: &[(u32, u32, u32)]) -> TestResult<BinaryVolume> {
    let mut bv = BinaryVolume::new(dims)?;
    for &(z, y, x) in points {
        bv.set(z, y, x, true)?;
    }
    Ok(bv)
}

/// Binary volume with a solid box set. `lo` is inclusive, `hi` exclusive.
pub fn binary_box(
    dims: Dims3,
    lo: (u32, u32, u32),
    hi: (u32, u32, u32),
) -> TestResult<BinaryVolume> {
    if hi.0 > dims.depth || hi.1 > dims.height || hi.2 > dims.width {
        return Err(TestError::InvalidFixture(format!(
            "box {:?}..{:?} does not fit in {}",
            lo, hi, dims
        )));
    }
    Ok(BinaryVolume::from_fn(dims, |z, y, x| {
        (lo.0..hi.0).contains(&z) && (lo.1..hi.1).contains(&y) && (lo.2..hi.2).contains(&x)
    })?)
}

/// 16-bit volume where the sample falls by `step` per column from `start`.
///
/// A median filter over such a ramp exceeds the input on one side of
/// every window, which is what exposes unsigned wraparound in subtraction.
pub fn descending_ramp(dims: Dims3, start: u16, step: u16) -> TestResult<Volume> {
    let needed = step as u64 * dims.width.saturating_sub(1) as u64;
    if needed > start as u64 {
        return Err(TestError::InvalidFixture(format!(
            "ramp from {start} by {step} goes negative over {} columns",
            dims.width
        )));
    }
    let data = (0..dims.len())
        .map(|i| {
            let (_, _, x) = dims.coords(i);
            start - step * x as u16
        })
        .collect();
    Ok(Volume::from_vec(dims, SampleDepth::Bit16, data)?)
}

/// A synthetic single-cell acquisition
///
/// Every slice holds a uniform disk (the cell body) on a flat background,
/// and each spot adds a bright 3×3×3 block (a punctum) on top.
#[derive(Debug, Clone)]
pub struct CellPhantom {
    /// Volume shape
    pub dims: Dims3,
    /// Sample depth of the generated volume
    pub sample_depth: SampleDepth,
    /// Background level outside the cell
    pub background: u16,
    /// Level of the cell body
    pub cell_level: u16,
    /// Cell disk radius in pixels, centred in each slice
    pub cell_radius: u32,
    /// Intensity added at each punctum
    pub spot_level: u16,
    /// Punctum centres (z, y, x)
    pub spots: Vec<(u32, u32, u32)>,
}

impl CellPhantom {
    /// Phantom with no spots and moderate levels.
    pub fn new(dims: Dims3, cell_radius: u32) -> Self {
        Self {
            dims,
            sample_depth: SampleDepth::Bit16,
            background: 100,
            cell_level: 400,
            cell_radius,
            spot_level: 3000,
            spots: Vec::new(),
        }
    }

    /// Add a punctum centred at (z, y, x).
    pub fn with_spot(mut self, z: u32, y: u32, x: u32) -> Self {
        self.spots.push((z, y, x));
        self
    }

    /// Set the punctum intensity.
    pub fn with_spot_level(mut self, level: u16) -> Self {
        self.spot_level = level;
        self
    }

    /// Set the sample depth.
    pub fn with_sample_depth(mut self, depth: SampleDepth) -> Self {
        self.sample_depth = depth;
        self
    }

    /// Number of pixels of the cell disk in one slice.
    pub fn disk_area(&self) -> usize {
        let (cy, cx) = self.center();
        let r2 = (self.cell_radius as i64).pow(2);
        let mut area = 0;
        for y in 0..self.dims.height as i64 {
            for x in 0..self.dims.width as i64 {
                if (y - cy).pow(2) + (x - cx).pow(2) <= r2 {
                    area += 1;
                }
            }
        }
        area
    }

    fn center(&self) -> (i64, i64) {
        (self.dims.height as i64 / 2, self.dims.width as i64 / 2)
    }

    /// Render the phantom.
    pub fn build(&self) -> TestResult<Volume> {
        let dims = self.dims;
        let (cy, cx) = self.center();
        let r2 = (self.cell_radius as i64).pow(2);
        let max = self.sample_depth.max_value();

        let mut data = vec![self.background.min(max); dims.len()];
        for (i, v) in data.iter_mut().enumerate() {
            let (_, y, x) = dims.coords(i);
            if (y as i64 - cy).pow(2) + (x as i64 - cx).pow(2) <= r2 {
                *v = self.cell_level.min(max);
            }
        }

        for &(sz, sy, sx) in &self.spots {
            for z in sz.saturating_sub(1)..=(sz + 1).min(dims.depth - 1) {
                for y in sy.saturating_sub(1)..=(sy + 1).min(dims.height - 1) {
                    for x in sx.saturating_sub(1)..=(sx + 1).min(dims.width - 1) {
                        let idx = dims.index(z, y, x);
                        data[idx] = data[idx].saturating_add(self.spot_level).min(max - 1);
                    }
                }
            }
        }

        Ok(Volume::from_vec(dims, self.sample_depth, data)?)
    }
}

/// Samples drawn from two separated integer clusters.
///
/// Each value in `low` appears `low_repeat` times and each value in `high`
/// appears `high_repeat` times.
pub fn bimodal_samples(
    low: std::ops::RangeInclusive<u16>,
    low_repeat: usize,
    high: std::ops::RangeInclusive<u16>,
    high_repeat: usize,
) -> Vec<u16> {
    let mut out = Vec::new();
    for v in low {
        out.extend(std::iter::repeat_n(v, low_repeat));
    }
    for v in high {
        out.extend(std::iter::repeat_n(v, high_repeat));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_box() {
        let bv = binary_box(Dims3::new(5, 5, 5), (1, 1, 1), (4, 4, 4)).unwrap();
        assert_eq!(bv.count_foreground(), 27);
        assert!(binary_box(Dims3::new(2, 2, 2), (0, 0, 0), (3, 1, 1)).is_err());
    }

    #[test]
    fn test_ramp() {
        let v = descending_ramp(Dims3::new(1, 1, 4), 300, 100).unwrap();
        assert_eq!(v.data(), &[300, 200, 100, 0]);
        assert!(descending_ramp(Dims3::new(1, 1, 5), 300, 100).is_err());
    }

    #[test]
    fn test_phantom_spots_stay_below_saturation() {
        let vol = CellPhantom::new(Dims3::new(5, 21, 21), 7)
            .with_spot(2, 10, 10)
            .with_spot_level(u16::MAX)
            .build()
            .unwrap();
        assert!(!vol.is_saturated());
        assert_eq!(vol.get(2, 10, 10), Some(u16::MAX - 1));
        assert_eq!(vol.get(0, 0, 0), Some(100));
    }
}
