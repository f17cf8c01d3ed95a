use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
pub(crate) type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A cell `(column, row)` on a board. The top left cell is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

/// A position on the half-cell lattice, in doubled units.
///
/// Cell `Location(c, r)` spans `2c..=2c + 2` horizontally and `2r..=2r + 2` vertically, so its centre is `(2c + 1, 2r + 1)`.
/// Rays only ever occupy the midpoints of cell edges, where exactly one coordinate is even:
/// an even `x` sits on a vertical grid line, an even `y` on a horizontal one.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct LatticePoint(pub i32, pub i32);

impl LatticePoint {
    #[inline]
    pub(crate) fn on_vertical_line(&self) -> bool {
        self.0.rem_euclid(2) == 0
    }

    #[inline]
    pub(crate) fn on_horizontal_line(&self) -> bool {
        self.1.rem_euclid(2) == 0
    }

    /// Whether this point is the midpoint of some cell edge, i.e. exactly one coordinate is even.
    pub fn is_edge_midpoint(&self) -> bool {
        self.on_vertical_line() != self.on_horizontal_line()
    }

    /// Whether this point lies inside or on the border of a board with the given dimensions.
    pub(crate) fn within(&self, dims: (Dimension, Dimension)) -> bool {
        let (w, h) = doubled(dims);
        (0..=w).contains(&self.0) && (0..=h).contains(&self.1)
    }

    pub(crate) fn offset_by(self, rhs: (i32, i32)) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Display for LatticePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

// board extent in lattice units
pub(crate) fn doubled(dims: (Dimension, Dimension)) -> (i32, i32) {
    (2 * dims.0.get() as i32, 2 * dims.1.get() as i32)
}
