use ndarray::Array2;
use thiserror::Error;

use crate::cell::{Block, Cell};
use crate::location::{Dimension, Location};

/// A movable block could not be put where it was asked to go while assembling a [`Placement`].
///
/// This is a logic error in whoever picked the cells, never a property of the puzzle.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum PlacementConflict {
    /// The cell already holds a block.
    #[error("cell {location:?} already holds {existing}, refusing to also place {incoming}")]
    Occupied {
        /// The contested cell.
        location: Location,
        /// What was there first.
        existing: Block,
        /// What was being added.
        incoming: Block,
    },
    /// The cell is not on the board.
    #[error("cell {location:?} is off the board, refusing to place {incoming}")]
    OffBoard {
        /// Where the block was meant to go.
        location: Location,
        /// What was being added.
        incoming: Block,
    },
}

/// Every block on the board for one candidate: the puzzle's fixed blocks plus the movable ones chosen by a search.
///
/// Built once per candidate and only read while rays are traced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Placement {
    pub(crate) blocks: Array2<Option<Block>>,
    pub(crate) movable: Vec<(Location, Block)>,
}

impl Placement {
    /// Start from the fixed blocks in `cells`, with nothing movable placed yet.
    pub(crate) fn from_cells(cells: &Array2<Cell>) -> Self {
        Self {
            blocks: cells.map(|cell| match cell {
                Cell::Fixed(block) => Some(*block),
                Cell::Open | Cell::Blocked => None,
            }),
            movable: Vec::new(),
        }
    }

    /// An empty placement with no blocks at all.
    pub fn empty(dims: (Dimension, Dimension)) -> Self {
        Self {
            blocks: Array2::from_elem((dims.1.get(), dims.0.get()), None),
            movable: Vec::new(),
        }
    }

    /// Put a movable `block` at `location`. Refuses to overwrite anything already there,
    /// and refuses locations off the board.
    pub fn place(&mut self, location: Location, block: Block) -> Result<&mut Self, PlacementConflict> {
        let Some(slot) = self.blocks.get_mut(location.as_index()) else {
            return Err(PlacementConflict::OffBoard { location, incoming: block });
        };
        if let Some(existing) = slot {
            return Err(PlacementConflict::Occupied { location, existing: *existing, incoming: block });
        }
        *slot = Some(block);
        self.movable.push((location, block));
        Ok(self)
    }

    /// Place every location in `locations` as `block`.
    pub(crate) fn place_all(&mut self, locations: &[Location], block: Block) -> Result<&mut Self, PlacementConflict> {
        for location in locations {
            self.place(*location, block)?;
        }
        Ok(self)
    }

    /// The block at `location`, if any; `None` also for locations off the board.
    pub fn get(&self, location: Location) -> Option<Block> {
        self.blocks.get(location.as_index()).copied().flatten()
    }

    /// Signed lookup used while tracing; the outer `None` means the cell is off the board.
    #[inline]
    pub(crate) fn probe(&self, (col, row): (i32, i32)) -> Option<Option<Block>> {
        if col < 0 || row < 0 {
            return None;
        }
        self.blocks.get((row as usize, col as usize)).copied()
    }

    /// The movable blocks in the order they were placed.
    pub fn movable(&self) -> &[(Location, Block)] {
        &self.movable
    }

    /// Width and height in cells.
    pub fn dims(&self) -> (usize, usize) {
        (self.blocks.ncols(), self.blocks.nrows())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::*;

    #[test]
    fn refuses_double_assignment() {
        let mut placement = Placement::empty((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()));
        placement.place(Location(1, 0), Block::Reflector).unwrap();

        let conflict = placement.place(Location(1, 0), Block::Opaque).unwrap_err();
        assert_eq!(
            conflict,
            PlacementConflict::Occupied { location: Location(1, 0), existing: Block::Reflector, incoming: Block::Opaque }
        );
        assert_eq!(placement.movable(), &[(Location(1, 0), Block::Reflector)]);
    }

    #[test]
    fn refuses_off_board() {
        let mut placement = Placement::empty((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()));

        assert_eq!(
            placement.place(Location(2, 0), Block::Splitter).unwrap_err(),
            PlacementConflict::OffBoard { location: Location(2, 0), incoming: Block::Splitter }
        );
        assert_eq!(
            placement.place(Location(0, 5), Block::Opaque).unwrap_err(),
            PlacementConflict::OffBoard { location: Location(0, 5), incoming: Block::Opaque }
        );
        assert!(placement.movable().is_empty());
        assert_eq!(placement.get(Location(0, 0)), None);
    }

    #[test]
    fn probe_bounds() {
        let mut placement = Placement::empty((NonZero::new(3).unwrap(), NonZero::new(1).unwrap()));
        placement.place(Location(2, 0), Block::Splitter).unwrap();

        assert_eq!(placement.probe((2, 0)), Some(Some(Block::Splitter)));
        assert_eq!(placement.probe((0, 0)), Some(None));
        assert_eq!(placement.probe((3, 0)), None);
        assert_eq!(placement.probe((0, -1)), None);
        assert_eq!(placement.probe((0, 1)), None);
    }
}
