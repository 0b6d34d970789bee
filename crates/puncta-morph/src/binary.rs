//! Binary morphological operations
//!
//! Implements erosion, dilation and opening of binary volumes and planes
//! with a flat [`Footprint`]. Like the shift-and-accumulate rasterop
//! scheme, each hit offset shifts the source and combines it into the
//! destination: OR for dilation, AND for erosion.
//!
//! Boundary conditions: dilation treats voxels outside the volume as
//! background, erosion treats them as foreground, so an object touching
//! the border is not eaten away from outside.

use crate::{Footprint, MorphError, MorphResult};
use puncta_core::{BinaryImage, BinaryVolume, Dims3};

#[derive(Clone, Copy)]
enum Combine {
    Or,
    And,
}

fn accumulate(
    volume: &BinaryVolume,
    footprint: &Footprint,
    combine: Combine,
) -> MorphResult<BinaryVolume> {
    let dims = volume.dims();
    let src = volume.data();
    let (init, outside) = match combine {
        Combine::Or => (false, false),
        Combine::And => (true, true),
    };
    let mut dst = vec![init; dims.len()];

    for hit in footprint.hit_offsets() {
        for (i, d) in dst.iter_mut().enumerate() {
            let (z, y, x) = dims.coords(i);
            let sz = z as i64 + hit.dz as i64;
            let sy = y as i64 + hit.dy as i64;
            let sx = x as i64 + hit.dx as i64;
            let s = if dims.contains(sz, sy, sx) {
                src[dims.index(sz as u32, sy as u32, sx as u32)]
            } else {
                outside
            };
            match combine {
                Combine::Or => *d |= s,
                Combine::And => *d &= s,
            }
        }
    }

    Ok(BinaryVolume::from_vec(dims, dst)?)
}

/// Dilate a binary volume
///
/// A voxel is set if any hit of the footprint, centred on it, covers a
/// foreground voxel. The footprints used here are symmetric, so no
/// reflection is applied.
pub fn dilate_binary(volume: &BinaryVolume, footprint: &Footprint) -> MorphResult<BinaryVolume> {
    accumulate(volume, footprint, Combine::Or)
}

/// Erode a binary volume
///
/// A voxel stays set only if every hit of the footprint covers foreground.
pub fn erode_binary(volume: &BinaryVolume, footprint: &Footprint) -> MorphResult<BinaryVolume> {
    accumulate(volume, footprint, Combine::And)
}

/// Open a binary volume
///
/// Opening = Erosion followed by Dilation.
/// Removes foreground smaller than the footprint and smooths contours.
pub fn open_binary(volume: &BinaryVolume, footprint: &Footprint) -> MorphResult<BinaryVolume> {
    let eroded = erode_binary(volume, footprint)?;
    dilate_binary(&eroded, footprint)
}

fn image_as_volume(image: &BinaryImage, footprint: &Footprint) -> MorphResult<BinaryVolume> {
    if !footprint.is_planar() {
        return Err(MorphError::InvalidSel(format!(
            "footprint {} is not planar and cannot be applied to a 2D image",
            footprint.name()
        )));
    }
    let d = image.dims();
    Ok(BinaryVolume::from_vec(
        Dims3::new(1, d.height, d.width),
        image.data().to_vec(),
    )?)
}

fn volume_as_image(volume: BinaryVolume, image: &BinaryImage) -> MorphResult<BinaryImage> {
    Ok(BinaryImage::from_vec(image.dims(), volume.data().to_vec())?)
}

/// Dilate a binary image with a planar footprint
pub fn dilate_image(image: &BinaryImage, footprint: &Footprint) -> MorphResult<BinaryImage> {
    let out = dilate_binary(&image_as_volume(image, footprint)?, footprint)?;
    volume_as_image(out, image)
}

/// Erode a binary image with a planar footprint
pub fn erode_image(image: &BinaryImage, footprint: &Footprint) -> MorphResult<BinaryImage> {
    let out = erode_binary(&image_as_volume(image, footprint)?, footprint)?;
    volume_as_image(out, image)
}

/// Open a binary image with a planar footprint
pub fn open_image(image: &BinaryImage, footprint: &Footprint) -> MorphResult<BinaryImage> {
    let out = open_binary(&image_as_volume(image, footprint)?, footprint)?;
    volume_as_image(out, image)
}
