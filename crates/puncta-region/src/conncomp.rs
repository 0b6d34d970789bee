//! Connected component labelling
//!
//! Two-pass labelling with a union-find table:
//!
//! 1. Raster scan (z, y, x). Each foreground voxel looks at the neighbours
//!    already visited (those before it in raster order) that are adjacent
//!    under the chosen [`Connectivity`]. It takes the smallest of their
//!    roots, or a fresh provisional label, and every neighbouring label is
//!    merged into one set.
//! 2. Second raster scan resolving each provisional label to its root and
//!    renumbering roots densely from 1 in order of first appearance.

use crate::error::{RegionError, RegionResult};
use puncta_core::{BinaryVolume, Connectivity, Dims3, Offset3};

/// Per-voxel component labels
///
/// 0 is background; components are numbered `1..=count` in raster order of
/// their first voxel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    dims: Dims3,
    labels: Vec<u32>,
    count: u32,
}

impl LabelMap {
    /// Get the shape
    #[inline]
    pub fn dims(&self) -> Dims3 {
        self.dims
    }

    /// Number of components
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Raster-ordered labels
    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Label at (z, y, x), or `None` if out of bounds.
    pub fn get(&self, z: u32, y: u32, x: u32) -> Option<u32> {
        if z >= self.dims.depth || y >= self.dims.height || x >= self.dims.width {
            return None;
        }
        Some(self.labels[self.dims.index(z, y, x)])
    }

    /// Binary mask of one component.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidLabel`] unless `1 <= label <= count`.
    pub fn component_mask(&self, label: u32) -> RegionResult<BinaryVolume> {
        if label == 0 || label > self.count {
            return Err(RegionError::InvalidLabel {
                label,
                count: self.count,
            });
        }
        let data = self.labels.iter().map(|&l| l == label).collect();
        Ok(BinaryVolume::from_vec(self.dims, data)?)
    }

    /// Binary mask of all labelled voxels.
    pub fn foreground(&self) -> RegionResult<BinaryVolume> {
        let data = self.labels.iter().map(|&l| l != 0).collect();
        Ok(BinaryVolume::from_vec(self.dims, data)?)
    }
}

/// Find the root label (path halving).
fn find_root(parents: &mut [u32], label: u32) -> u32 {
    let mut current = label;
    while current != parents[current as usize] {
        let grandparent = parents[parents[current as usize] as usize];
        parents[current as usize] = grandparent;
        current = grandparent;
    }
    current
}

/// Merge two sets, keeping the smaller root as the representative.
fn union_labels(parents: &mut [u32], a: u32, b: u32) -> u32 {
    let ra = find_root(parents, a);
    let rb = find_root(parents, b);
    if ra < rb {
        parents[rb as usize] = ra;
        ra
    } else {
        parents[ra as usize] = rb;
        rb
    }
}

/// Offsets to neighbours that precede the centre in raster order.
fn backward_offsets(connectivity: Connectivity) -> Vec<Offset3> {
    connectivity
        .offsets()
        .filter(|o| (o.dz, o.dy, o.dx) < (0, 0, 0))
        .collect()
}

/// Label the connected foreground regions of `volume`.
pub fn label_components(
    volume: &BinaryVolume,
    connectivity: Connectivity,
) -> RegionResult<LabelMap> {
    let dims = volume.dims();
    let fg = volume.data();
    let backward = backward_offsets(connectivity);

    let mut provisional = vec![0u32; dims.len()];
    // parents[0] is unused so that label 0 stays background
    let mut parents: Vec<u32> = vec![0];

    for (i, _) in fg.iter().enumerate().filter(|&(_, &f)| f) {
        let (z, y, x) = dims.coords(i);
        let mut label = 0u32;
        for o in &backward {
            let nz = z as i64 + o.dz as i64;
            let ny = y as i64 + o.dy as i64;
            let nx = x as i64 + o.dx as i64;
            if !dims.contains(nz, ny, nx) {
                continue;
            }
            let n = provisional[dims.index(nz as u32, ny as u32, nx as u32)];
            if n == 0 {
                continue;
            }
            label = if label == 0 {
                find_root(&mut parents, n)
            } else {
                union_labels(&mut parents, label, n)
            };
        }
        if label == 0 {
            label = parents.len() as u32;
            parents.push(label);
        }
        provisional[i] = label;
    }

    // Dense renumbering by first appearance of each root
    let mut dense = vec![0u32; parents.len()];
    let mut count = 0u32;
    let mut labels = vec![0u32; dims.len()];
    for (i, &p) in provisional.iter().enumerate() {
        if p == 0 {
            continue;
        }
        let root = find_root(&mut parents, p) as usize;
        if dense[root] == 0 {
            count += 1;
            dense[root] = count;
        }
        labels[i] = dense[root];
    }

    log::debug!(
        "labelled {} components in {} ({} provisional, {:?} connectivity)",
        count,
        dims,
        parents.len() - 1,
        connectivity
    );

    Ok(LabelMap {
        dims,
        labels,
        count,
    })
}

/// Label `volume` and return the label map with its component count.
pub fn label_and_count(
    volume: &BinaryVolume,
    connectivity: Connectivity,
) -> RegionResult<(LabelMap, u32)> {
    let map = label_components(volume, connectivity)?;
    let count = map.count();
    Ok((map, count))
}

/// Size and position of one labelled component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Component label (1-based)
    pub label: u32,
    /// Number of voxels
    pub voxels: usize,
    /// Mean (z, y, x) position
    pub centroid: (f64, f64, f64),
    /// Smallest (z, y, x) covered, inclusive
    pub min: (u32, u32, u32),
    /// Largest (z, y, x) covered, inclusive
    pub max: (u32, u32, u32),
}

/// Statistics for every component of `map`, indexed by `label - 1`.
pub fn component_stats(map: &LabelMap) -> Vec<ComponentStats> {
    let mut stats: Vec<ComponentStats> = (1..=map.count)
        .map(|label| ComponentStats {
            label,
            voxels: 0,
            centroid: (0.0, 0.0, 0.0),
            min: (u32::MAX, u32::MAX, u32::MAX),
            max: (0, 0, 0),
        })
        .collect();

    for (i, &l) in map.labels.iter().enumerate() {
        if l == 0 {
            continue;
        }
        let (z, y, x) = map.dims.coords(i);
        let s = &mut stats[(l - 1) as usize];
        s.voxels += 1;
        s.centroid.0 += z as f64;
        s.centroid.1 += y as f64;
        s.centroid.2 += x as f64;
        s.min = (s.min.0.min(z), s.min.1.min(y), s.min.2.min(x));
        s.max = (s.max.0.max(z), s.max.1.max(y), s.max.2.max(x));
    }

    for s in &mut stats {
        let n = s.voxels as f64;
        s.centroid = (s.centroid.0 / n, s.centroid.1 / n, s.centroid.2 / n);
    }
    stats
}
