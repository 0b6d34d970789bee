//! Rank filtering operations
//!
//! Rank (order-statistic) filters over a flat, planar [`Footprint`]. Each
//! output sample is the value of the requested rank among the samples the
//! footprint covers when centred on it.
//!
//! Planes are extended by reflection about the edge (half-sample
//! symmetric, `d c b a | a b c d`), so every window is full and no sample
//! outside the plane is invented. Volumes are filtered slice by slice with
//! no mixing between Z-slices.

use crate::{FilterError, FilterResult};
use puncta_core::{Dims2, Image, Volume};
use puncta_morph::Footprint;

/// Map a possibly out-of-range coordinate into `0..len` by reflection.
#[inline]
fn reflect(i: i64, len: i64) -> usize {
    let period = 2 * len;
    let m = i.rem_euclid(period);
    (if m >= len { period - 1 - m } else { m }) as usize
}

fn check_rank(rank: f32) -> FilterResult<()> {
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameters(format!(
            "rank must be in [0.0, 1.0], got {rank}"
        )));
    }
    Ok(())
}

fn check_footprint(footprint: &Footprint) -> FilterResult<Vec<(i64, i64)>> {
    if !footprint.is_planar() {
        return Err(FilterError::InvalidParameters(format!(
            "rank filter needs a planar footprint, {} is not",
            footprint.name()
        )));
    }
    Ok(footprint
        .hit_offsets()
        .iter()
        .map(|o| (o.dy as i64, o.dx as i64))
        .collect())
}

/// Filter one raster-ordered plane into `out`.
fn rank_plane(src: &[u16], dims: Dims2, offsets: &[(i64, i64)], rank: f32, out: &mut [u16]) {
    let h = dims.height as i64;
    let w = dims.width as i64;
    let k = offsets.len();
    let pos = ((k - 1) as f32 * rank).round() as usize;
    let mut window = vec![0u16; k];

    for y in 0..h {
        for x in 0..w {
            for (slot, &(dy, dx)) in window.iter_mut().zip(offsets) {
                let sy = reflect(y + dy, h);
                let sx = reflect(x + dx, w);
                *slot = src[sy * w as usize + sx];
            }
            let (_, v, _) = window.select_nth_unstable(pos);
            out[(y * w + x) as usize] = *v;
        }
    }
}

/// Apply a rank filter to a plane.
///
/// # Arguments
/// * `image` - Input plane
/// * `footprint` - Planar footprint
/// * `rank` - Rank value in [0.0, 1.0] (0.0=min, 0.5=median, 1.0=max)
pub fn rank_filter_image(image: &Image, footprint: &Footprint, rank: f32) -> FilterResult<Image> {
    check_rank(rank)?;
    let offsets = check_footprint(footprint)?;
    let mut out = vec![0u16; image.data().len()];
    rank_plane(image.data(), image.dims(), &offsets, rank, &mut out);
    Ok(Image::from_vec(image.dims(), image.sample_depth(), out)?)
}

/// Apply a rank filter to every Z-slice of a volume independently.
pub fn rank_filter_slices(
    volume: &Volume,
    footprint: &Footprint,
    rank: f32,
) -> FilterResult<Volume> {
    check_rank(rank)?;
    let offsets = check_footprint(footprint)?;
    let dims = volume.dims();
    let plane = dims.plane();
    let plane_len = dims.plane_len();

    let mut out = vec![0u16; dims.len()];
    for (z, dst) in out.chunks_exact_mut(plane_len).enumerate() {
        rank_plane(volume.slice(z as u32), plane, &offsets, rank, dst);
    }
    Ok(Volume::from_vec(dims, volume.sample_depth(), out)?)
}

fn disk_for(radius: u32) -> FilterResult<Footprint> {
    if radius == 0 {
        return Err(FilterError::InvalidParameters(
            "median radius must be at least 1".to_string(),
        ));
    }
    Ok(Footprint::disk(radius))
}

/// Median filter a plane with a disk of radius `radius`.
pub fn median_filter_image(image: &Image, radius: u32) -> FilterResult<Image> {
    rank_filter_image(image, &disk_for(radius)?, 0.5)
}

/// Median filter every Z-slice of a volume with a disk of radius `radius`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `radius` is 0.
pub fn median_filter_slices(volume: &Volume, radius: u32) -> FilterResult<Volume> {
    rank_filter_slices(volume, &disk_for(radius)?, 0.5)
}
