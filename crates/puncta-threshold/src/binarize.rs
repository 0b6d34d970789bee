//! Fixed-threshold binarization

use crate::error::ThresholdResult;
use puncta_core::{BinaryImage, BinaryVolume, Image, Volume};

/// Binarize a volume: a voxel is foreground iff its sample exceeds `threshold`.
pub fn binarize(volume: &Volume, threshold: f64) -> ThresholdResult<BinaryVolume> {
    let data = volume.data().iter().map(|&v| v as f64 > threshold).collect();
    Ok(BinaryVolume::from_vec(volume.dims(), data)?)
}

/// Binarize a plane: a pixel is foreground iff its sample exceeds `threshold`.
pub fn binarize_image(image: &Image, threshold: f64) -> ThresholdResult<BinaryImage> {
    let data = image.data().iter().map(|&v| v as f64 > threshold).collect();
    Ok(BinaryImage::from_vec(image.dims(), data)?)
}
