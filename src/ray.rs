use strum::VariantArray;

use crate::cell::Block;
use crate::location::LatticePoint;

/// The four diagonal directions a ray may travel in.
///
/// `Up` is towards row 0; each step moves one lattice unit along both axes.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Heading {
    /// `(-1, -1)`
    UpLeft,
    /// `(1, -1)`
    UpRight,
    /// `(-1, 1)`
    DownLeft,
    /// `(1, 1)`
    DownRight,
}

impl Heading {
    /// Build a heading from velocity components, each of which must be `-1` or `1`.
    pub fn from_velocity(vx: i32, vy: i32) -> Option<Self> {
        match (vx, vy) {
            (-1, -1) => Some(Self::UpLeft),
            (1, -1) => Some(Self::UpRight),
            (-1, 1) => Some(Self::DownLeft),
            (1, 1) => Some(Self::DownRight),
            _ => None,
        }
    }

    /// The `(vx, vy)` velocity of this heading.
    pub fn velocity(&self) -> (i32, i32) {
        match self {
            Self::UpLeft => (-1, -1),
            Self::UpRight => (1, -1),
            Self::DownLeft => (-1, 1),
            Self::DownRight => (1, 1),
        }
    }

    /// Mirror the horizontal component.
    pub fn flip_x(&self) -> Self {
        match self {
            Self::UpLeft => Self::UpRight,
            Self::UpRight => Self::UpLeft,
            Self::DownLeft => Self::DownRight,
            Self::DownRight => Self::DownLeft,
        }
    }

    /// Mirror the vertical component.
    pub fn flip_y(&self) -> Self {
        match self {
            Self::UpLeft => Self::DownLeft,
            Self::UpRight => Self::DownRight,
            Self::DownLeft => Self::UpLeft,
            Self::DownRight => Self::UpRight,
        }
    }
}

/// A light source: a fixed origin on an edge midpoint and a heading.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Lazor {
    pub(crate) origin: LatticePoint,
    pub(crate) heading: Heading,
}

impl Lazor {
    /// A lazor at `origin` travelling in `heading`.
    pub fn new(origin: LatticePoint, heading: Heading) -> Self {
        Self { origin, heading }
    }

    /// Where this lazor starts.
    pub fn origin(&self) -> LatticePoint {
        self.origin
    }

    /// The direction this lazor fires in.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub(crate) fn ray(&self) -> Ray {
        Ray { at: self.origin, heading: self.heading }
    }
}

/// The complete state of one ray branch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Ray {
    /// Current position, always an edge midpoint.
    pub at: LatticePoint,
    /// Current direction of travel.
    pub heading: Heading,
}

impl Ray {
    /// The cell this ray is about to cross, as signed `(column, row)`; negative or too-large values are off the board.
    ///
    /// On a vertical line the ray crosses into the column on the side it is heading towards, staying in its row.
    /// On a horizontal line it is the other way round.
    pub(crate) fn facing(&self) -> (i32, i32) {
        let (vx, vy) = self.heading.velocity();
        let LatticePoint(x, y) = self.at;
        if self.at.on_vertical_line() {
            ((x + vx).div_euclid(2), y.div_euclid(2))
        } else {
            (x.div_euclid(2), (y + vy).div_euclid(2))
        }
    }

    /// Continue straight through the facing cell.
    pub fn advance(&self) -> Self {
        Self { at: self.at.offset_by(self.heading.velocity()), heading: self.heading }
    }

    /// Bounce off the face of the facing cell: flip the component across the line the ray sits on, then step away.
    pub fn reflect(&self) -> Self {
        let heading = if self.at.on_vertical_line() {
            self.heading.flip_x()
        } else {
            self.heading.flip_y()
        };
        Self { at: self.at.offset_by(heading.velocity()), heading }
    }
}

/// What becomes of a ray when it meets a block.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Contact {
    /// The branch continues as this one ray.
    Continue(Ray),
    /// The branch ends here.
    Absorb,
    /// The branch becomes two: transmitted, then reflected.
    Split(Ray, Ray),
}

impl Block {
    /// Apply this block to `ray`, which is facing it.
    pub fn on_contact(&self, ray: Ray) -> Contact {
        match self {
            Block::Reflector => Contact::Continue(ray.reflect()),
            Block::Opaque => Contact::Absorb,
            Block::Splitter => Contact::Split(ray.advance(), ray.reflect()),
        }
    }
}
