//! 3×3×3 voxel neighbourhoods
//!
//! [`NEIGHBOR_OFFSETS`] lists every voxel adjacent to a centre voxel in a
//! 3×3×3 cube, excluding the centre. It is built once at compile time and
//! shared read-only by erosion and labelling.
//!
//! The adjacency rules used for labelling are subsets of that table,
//! selected by how many axes an offset moves along:
//!
//! | Connectivity | Offsets | Moves along |
//! |---|---|---|
//! | [`Connectivity::Six`] | 6 | one axis (faces) |
//! | [`Connectivity::Eighteen`] | 18 | up to two axes (faces, edges) |
//! | [`Connectivity::TwentySix`] | 26 | up to three axes (faces, edges, corners) |

use crate::error::{Error, Result};

/// Relative position of a neighbouring voxel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset3 {
    /// Z step (-1, 0 or 1)
    pub dz: i32,
    /// Y step (-1, 0 or 1)
    pub dy: i32,
    /// X step (-1, 0 or 1)
    pub dx: i32,
}

impl Offset3 {
    /// Create an offset.
    pub const fn new(dz: i32, dy: i32, dx: i32) -> Self {
        Self { dz, dy, dx }
    }

    /// Number of axes this offset moves along (1 = face, 2 = edge, 3 = corner).
    pub const fn order(&self) -> u32 {
        self.dz.unsigned_abs() + self.dy.unsigned_abs() + self.dx.unsigned_abs()
    }
}

/// Number of neighbours of a voxel in a 3×3×3 cube.
pub const NEIGHBOR_COUNT: usize = 26;

/// All 26 offsets of the 3×3×3 neighbourhood, in z-major raster order.
pub const NEIGHBOR_OFFSETS: [Offset3; NEIGHBOR_COUNT] = build_offsets();

const fn build_offsets() -> [Offset3; NEIGHBOR_COUNT] {
    let mut out = [Offset3::new(0, 0, 0); NEIGHBOR_COUNT];
    let mut i = 0;
    let mut dz = -1;
    while dz <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dx = -1;
            while dx <= 1 {
                if dz != 0 || dy != 0 || dx != 0 {
                    out[i] = Offset3::new(dz, dy, dx);
                    i += 1;
                }
                dx += 1;
            }
            dy += 1;
        }
        dz += 1;
    }
    out
}

/// Adjacency rule for connected-component labelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Face neighbours only
    Six,
    /// Face and edge neighbours
    #[default]
    Eighteen,
    /// Face, edge and corner neighbours
    TwentySix,
}

impl Connectivity {
    /// Parse from a neighbour count (6, 18 or 26).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for any other count.
    pub fn from_neighbors(count: u32) -> Result<Self> {
        match count {
            6 => Ok(Connectivity::Six),
            18 => Ok(Connectivity::Eighteen),
            26 => Ok(Connectivity::TwentySix),
            _ => Err(Error::InvalidParameter(format!(
                "connectivity must be 6, 18 or 26, got {count}"
            ))),
        }
    }

    /// Number of neighbours under this rule.
    pub fn neighbor_count(self) -> usize {
        match self {
            Connectivity::Six => 6,
            Connectivity::Eighteen => 18,
            Connectivity::TwentySix => 26,
        }
    }

    fn max_order(self) -> u32 {
        match self {
            Connectivity::Six => 1,
            Connectivity::Eighteen => 2,
            Connectivity::TwentySix => 3,
        }
    }

    /// True if `offset` counts as adjacent under this rule.
    #[inline]
    pub fn includes(self, offset: Offset3) -> bool {
        let order = offset.order();
        order >= 1 && order <= self.max_order()
    }

    /// Offsets that count as adjacent under this rule.
    pub fn offsets(self) -> impl Iterator<Item = Offset3> {
        NEIGHBOR_OFFSETS
            .iter()
            .copied()
            .filter(move |&o| self.includes(o))
    }
}
