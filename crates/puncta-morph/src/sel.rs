//! Flat structuring elements
//!
//! A [`Footprint`] is a set of hit offsets around an origin at (0, 0, 0).
//! Planar footprints (all `dz == 0`) act on each Z-slice independently and
//! are the only ones accepted for 2D images.

use crate::{MorphError, MorphResult};
use puncta_core::{Connectivity, Offset3};

/// Flat structuring element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    offsets: Vec<Offset3>,
    name: String,
}

impl Footprint {
    /// Create a footprint from explicit hit offsets.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if `offsets` is empty.
    pub fn from_offsets(offsets: Vec<Offset3>, name: impl Into<String>) -> MorphResult<Self> {
        if offsets.is_empty() {
            return Err(MorphError::InvalidSel("footprint has no hits".to_string()));
        }
        Ok(Self {
            offsets,
            name: name.into(),
        })
    }

    /// Planar disk of radius `radius`: every `(dy, dx)` with
    /// `dy² + dx² <= radius²`.
    ///
    /// A radius of 0 is the single origin pixel.
    pub fn disk(radius: u32) -> Self {
        let r = radius as i32;
        let r2 = r * r;
        let mut offsets = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if dy * dy + dx * dx <= r2 {
                    offsets.push(Offset3::new(0, dy, dx));
                }
            }
        }
        Self {
            offsets,
            name: format!("disk{radius}"),
        }
    }

    /// Planar cross: the origin and its 4 in-plane face neighbours.
    pub fn cross_2d() -> Self {
        let offsets = std::iter::once(Offset3::new(0, 0, 0))
            .chain(Connectivity::Six.offsets().filter(|o| o.dz == 0))
            .collect();
        Self {
            offsets,
            name: "cross4".to_string(),
        }
    }

    /// 3D cross: the origin and its 6 face neighbours.
    pub fn cross_3d() -> Self {
        let offsets = std::iter::once(Offset3::new(0, 0, 0))
            .chain(Connectivity::Six.offsets())
            .collect();
        Self {
            offsets,
            name: "cross6".to_string(),
        }
    }

    /// Get the name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hit offsets relative to the origin.
    pub fn hit_offsets(&self) -> &[Offset3] {
        &self.offsets
    }

    /// Number of hits
    pub fn hit_count(&self) -> usize {
        self.offsets.len()
    }

    /// True if no hit leaves the Z = 0 plane.
    pub fn is_planar(&self) -> bool {
        self.offsets.iter().all(|o| o.dz == 0)
    }
}
