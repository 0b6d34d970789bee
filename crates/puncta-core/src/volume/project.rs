//! Projections along Z

use super::Volume;
use crate::binary::{BinaryImage, BinaryVolume};
use crate::error::Result;
use crate::image::Image;

impl Volume {
    /// Maximum-intensity projection across Z.
    ///
    /// Each output pixel is the largest sample found at that (y, x) in any
    /// slice. The projection keeps the volume's sample depth.
    pub fn max_project(&self) -> Result<Image> {
        let plane = self.dims().plane_len();
        let mut out = self.slice(0).to_vec();
        for z in 1..self.depth() {
            for (acc, &v) in out.iter_mut().zip(self.slice(z)) {
                *acc = (*acc).max(v);
            }
        }
        debug_assert_eq!(out.len(), plane);
        Image::from_vec(self.dims().plane(), self.sample_depth(), out)
    }
}

impl BinaryVolume {
    /// Logical OR across Z: a pixel is set if any slice is set there.
    pub fn max_project(&self) -> Result<BinaryImage> {
        let dims = self.dims();
        let plane = dims.plane_len();
        let mut out = vec![false; plane];
        for slice in self.data().chunks_exact(plane) {
            for (acc, &v) in out.iter_mut().zip(slice) {
                *acc |= v;
            }
        }
        BinaryImage::from_vec(dims.plane(), out)
    }
}
