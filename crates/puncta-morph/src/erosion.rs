//! Neighbour-count erosion
//!
//! A foreground voxel survives a pass iff at least `n` of its 26 neighbours
//! are foreground. Voxels outside the volume count as background.
//!
//! Counts are accumulated by shifting: the volume is padded by one
//! background voxel on every face, and for each offset in
//! [`NEIGHBOR_OFFSETS`] the shifted padded volume is added row by row into
//! a per-voxel counter. The survivor test then runs on the unpadded
//! region, so no index arithmetic ever leaves the padded buffer.
//!
//! In convergence mode passes repeat until one removes nothing. Each
//! non-final pass removes at least one voxel, so a volume with `F`
//! foreground voxels settles in at most `F + 1` passes.

use crate::{MorphError, MorphResult};
use puncta_core::{BinaryVolume, NEIGHBOR_COUNT, NEIGHBOR_OFFSETS};

/// Required number of foreground neighbours, in `1..=26`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighborCount(u8);

impl NeighborCount {
    /// Clamp `n` into `1..=26`.
    ///
    /// Out-of-range values are not an error: `0` behaves as `1` and
    /// anything above 26 behaves as 26. A warning is logged when clamping.
    pub fn new(n: u32) -> Self {
        match Self::try_new(n) {
            Ok(count) => count,
            Err(_) => {
                let clamped = n.clamp(1, NEIGHBOR_COUNT as u32);
                log::warn!("erosion neighbour count {n} out of range, using {clamped}");
                Self(clamped as u8)
            }
        }
    }

    /// Strict constructor.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidErosionParameter`] unless `1 <= n <= 26`.
    pub fn try_new(n: u32) -> MorphResult<Self> {
        if (1..=NEIGHBOR_COUNT as u32).contains(&n) {
            Ok(Self(n as u8))
        } else {
            Err(MorphError::InvalidErosionParameter(n))
        }
    }

    /// The count as an integer.
    #[inline]
    pub fn get(self) -> u32 {
        self.0 as u32
    }
}

impl Default for NeighborCount {
    fn default() -> Self {
        Self(3)
    }
}

/// Options for [`erode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErosionOptions {
    /// Required number of foreground neighbours
    pub n: NeighborCount,
    /// Repeat passes until one removes nothing
    pub until_stable: bool,
    /// Optional ceiling on the number of passes in convergence mode
    pub max_passes: Option<u32>,
}

impl Default for ErosionOptions {
    fn default() -> Self {
        Self {
            n: NeighborCount::default(),
            until_stable: false,
            max_passes: None,
        }
    }
}

impl ErosionOptions {
    /// Single-pass erosion with neighbour count `n` (clamped).
    pub fn new(n: u32) -> Self {
        Self {
            n: NeighborCount::new(n),
            ..Self::default()
        }
    }

    /// Set the neighbour count (clamped).
    pub fn with_n(mut self, n: u32) -> Self {
        self.n = NeighborCount::new(n);
        self
    }

    /// Enable or disable convergence mode.
    pub fn with_until_stable(mut self, until_stable: bool) -> Self {
        self.until_stable = until_stable;
        self
    }

    /// Cap the number of passes in convergence mode.
    pub fn with_max_passes(mut self, max_passes: u32) -> Self {
        self.max_passes = Some(max_passes);
        self
    }
}

/// Result of [`erode`]
#[derive(Debug, Clone)]
pub struct ErosionOutcome {
    /// The eroded volume
    pub volume: BinaryVolume,
    /// Number of passes run, including a final pass that removed nothing
    pub passes: u32,
    /// True if the last pass removed no voxels
    pub converged: bool,
}

/// Count foreground neighbours of every voxel.
///
/// Returns one count in `0..=26` per voxel, in the volume's raster order.
pub fn neighbor_counts(volume: &BinaryVolume) -> Vec<u8> {
    let dims = volume.dims();
    let padded_dims = dims.padded(1);

    let mut padded = vec![false; padded_dims.len()];
    for z in 0..dims.depth {
        for y in 0..dims.height {
            let src = dims.index(z, y, 0);
            let dst = padded_dims.index(z + 1, y + 1, 1);
            let w = dims.width as usize;
            padded[dst..dst + w].copy_from_slice(&volume.data()[src..src + w]);
        }
    }

    let w = dims.width as usize;
    let mut counts = vec![0u8; dims.len()];
    for offset in NEIGHBOR_OFFSETS.iter() {
        for z in 0..dims.depth {
            for y in 0..dims.height {
                let sz = (z as i32 + 1 + offset.dz) as u32;
                let sy = (y as i32 + 1 + offset.dy) as u32;
                let sx = (1 + offset.dx) as u32;
                let src = padded_dims.index(sz, sy, sx);
                let dst = dims.index(z, y, 0);
                add_row(&mut counts[dst..dst + w], &padded[src..src + w]);
            }
        }
    }
    counts
}

#[inline]
fn add_row(dst: &mut [u8], src: &[bool]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d += s as u8;
    }
}

/// Run a single erosion pass.
///
/// Returns the eroded volume and the number of voxels removed.
pub fn erode_neighbors(
    volume: &BinaryVolume,
    n: NeighborCount,
) -> MorphResult<(BinaryVolume, usize)> {
    let counts = neighbor_counts(volume);
    let threshold = n.0;

    let mut removed = 0usize;
    let data: Vec<bool> = volume
        .data()
        .iter()
        .zip(&counts)
        .map(|(&fg, &c)| {
            let keep = fg && c >= threshold;
            if fg && !keep {
                removed += 1;
            }
            keep
        })
        .collect();

    Ok((BinaryVolume::from_vec(volume.dims(), data)?, removed))
}

/// Single-pass erosion with neighbour count `n`, clamped to `1..=26`.
pub fn erode_count(volume: &BinaryVolume, n: u32) -> MorphResult<BinaryVolume> {
    let (out, _) = erode_neighbors(volume, NeighborCount::new(n))?;
    Ok(out)
}

/// Erode `volume` according to `options`.
///
/// # Errors
///
/// Returns [`MorphError::InvalidParameters`] if `max_passes` is `Some(0)`.
pub fn erode(volume: &BinaryVolume, options: &ErosionOptions) -> MorphResult<ErosionOutcome> {
    if options.max_passes == Some(0) {
        return Err(MorphError::InvalidParameters(
            "max_passes must be at least 1".to_string(),
        ));
    }

    let (mut current, removed) = erode_neighbors(volume, options.n)?;
    let mut passes = 1u32;
    let mut converged = removed == 0;
    log::trace!("erosion pass 1 removed {removed} voxels");

    if options.until_stable {
        // Each pass before the last removes at least one voxel.
        let bound = volume.count_foreground().saturating_add(1);
        let ceiling = options
            .max_passes
            .map_or(bound, |m| (m as usize).min(bound));

        while !converged && (passes as usize) < ceiling {
            let (next, removed) = erode_neighbors(&current, options.n)?;
            passes += 1;
            log::trace!("erosion pass {passes} removed {removed} voxels");
            current = next;
            converged = removed == 0;
        }

        if !converged {
            log::warn!(
                "erosion with n = {} stopped after {passes} passes without converging",
                options.n.get()
            );
        } else {
            log::debug!(
                "erosion with n = {} converged after {passes} passes",
                options.n.get()
            );
        }
    }

    Ok(ErosionOutcome {
        volume: current,
        passes,
        converged,
    })
}
