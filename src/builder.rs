//! Chained construction of [`Board`]s, collecting every reason a board would be invalid.

use std::collections::HashSet;
use std::num::NonZero;
use std::ops::IndexMut;

use itertools::Itertools;
use ndarray::{Array2, AssignElem};

use crate::board::Board;
use crate::cell::{Block, BlockCounts, Cell};
use crate::location::{Dimension, LatticePoint, Location};
use crate::placement::Placement;
use crate::ray::{Heading, Lazor};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A cell, lazor or point was placed outside the bounds specified by `dims` on the builder.
    FeatureOutOfBounds,
    /// A lazor origin is not the midpoint of a cell edge.
    LazorOffEdge,
    /// A target point is not the midpoint of a cell edge, so no ray can ever touch it.
    PointOffEdge,
    /// A lazor velocity component was something other than `-1` or `1`.
    BadHeading,
    /// A row was handed over with the wrong number of cells.
    RaggedRow,
}

/// A builder for [`Board`]s.
///
/// Every cell starts [`Open`](Cell::Open). Methods mutate the builder and can be chained;
/// once any of them has recorded a [`BuilderInvalidReason`], later calls do nothing.
/// The builder can be [`Clone`]d to save its state at some point.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    // width, height
    dims: (Dimension, Dimension),
    cells: Array2<Cell>,
    counts: BlockCounts,
    lazors: Vec<Lazor>,
    points: Vec<LatticePoint>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()))
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(width, height)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), Cell::default),

            counts: Default::default(),
            lazors: Default::default(),
            points: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Set a single cell.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    pub fn set_cell(&mut self, location: Location, cell: Cell) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !location.within(self.dims) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.cells.index_mut(location.as_index()).assign_elem(cell);
        self
    }

    /// Set a whole row of cells, left to right.
    ///
    /// May cause the builder to enter a [`RaggedRow`](BuilderInvalidReason::RaggedRow) invalid state if `cells` is not exactly as wide as the board,
    /// or [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) if `row` does not exist.
    pub fn set_row(&mut self, row: usize, cells: &[Cell]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if cells.len() != self.dims.0.get() {
            self.invalid_reasons.push(BuilderInvalidReason::RaggedRow);
            return self;
        }

        for (x, cell) in cells.iter().enumerate() {
            self.set_cell(Location(x, row), *cell);
        }
        self
    }

    /// Mark a cell as unable to hold a movable block. Shorthand for [`Self::set_cell`] with [`Cell::Blocked`].
    pub fn block(&mut self, location: Location) -> &mut Self {
        self.set_cell(location, Cell::Blocked)
    }

    /// Fix `block` at `location`. Shorthand for [`Self::set_cell`] with [`Cell::Fixed`].
    pub fn fix(&mut self, location: Location, block: Block) -> &mut Self {
        self.set_cell(location, Cell::Fixed(block))
    }

    /// Require `count` movable blocks of kind `block`, replacing any earlier count for that kind.
    pub fn movable(&mut self, block: Block, count: usize) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        *self.counts.of_mut(block) = count;
        self
    }

    /// Add a lazor at `origin` with velocity `(vx, vy)`, in lattice units.
    ///
    /// May cause the builder to enter a [`BadHeading`](BuilderInvalidReason::BadHeading),
    /// [`LazorOffEdge`](BuilderInvalidReason::LazorOffEdge) or [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state.
    pub fn add_lazor(&mut self, origin: LatticePoint, velocity: (i32, i32)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let Some(heading) = Heading::from_velocity(velocity.0, velocity.1) else {
            self.invalid_reasons.push(BuilderInvalidReason::BadHeading);
            return self;
        };

        if !origin.is_edge_midpoint() {
            self.invalid_reasons.push(BuilderInvalidReason::LazorOffEdge);
            return self;
        }

        if !origin.within(self.dims) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.lazors.push(Lazor::new(origin, heading));
        self
    }

    /// Remove the most recently added lazor.
    ///
    /// If the builder is in an invalid state or no lazors are present, this function does nothing.
    pub fn pop_lazor(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.lazors.pop();
        self
    }

    /// Add a point which some ray must touch. Adding the same point twice has no further effect.
    ///
    /// May cause the builder to enter a [`PointOffEdge`](BuilderInvalidReason::PointOffEdge) or
    /// [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state.
    pub fn add_point(&mut self, point: LatticePoint) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !point.is_edge_midpoint() {
            self.invalid_reasons.push(BuilderInvalidReason::PointOffEdge);
            return self;
        }

        if !point.within(self.dims) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        if !self.points.contains(&point) {
            self.points.push(point);
        }
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    ///
    /// Puzzle-level problems such as having no lazors are not checked here; [`Board::solve`] reports those.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        // row-major, which fixes the order the search tries cells in
        let open = self.cells.indexed_iter()
            .filter(|(_, cell)| **cell == Cell::Open)
            .map(|(index, _)| Location::from(index))
            .collect_vec();

        Ok(Board {
            dims: self.dims,
            fixed: Placement::from_cells(&self.cells),
            cells: self.cells.clone(),
            open,
            counts: self.counts,
            lazors: self.lazors.clone(),
            points: self.points.iter().copied().collect::<HashSet<_>>(),
        })
    }
}
