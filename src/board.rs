use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::debug;
use ndarray::Array2;

use crate::cell::{BlockCounts, Cell};
use crate::config::SearchConfig;
use crate::engine;
use crate::error::SolverFailure;
use crate::location::{Dimension, LatticePoint, Location};
use crate::placement::Placement;
use crate::ray::Lazor;
use crate::search::{self, SearchOutcome};

/// A Lazors puzzle: the grid, the blocks still to be placed, the lazors and the points they must reach.
///
/// A board never changes once built. [`Board`]s should be built using a [`BoardBuilder`](crate::builder::BoardBuilder)
/// or loaded with [`bff::parse`](crate::bff::parse).
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) cells: Array2<Cell>,
    // open cells in row-major order
    pub(crate) open: Vec<Location>,
    // fixed blocks only, cloned for every candidate
    pub(crate) fixed: Placement,
    pub(crate) counts: BlockCounts,
    pub(crate) lazors: Vec<Lazor>,
    pub(crate) points: HashSet<LatticePoint>,
}

impl Board {
    /// Refuse puzzles that cannot be searched at all.
    pub fn check(&self) -> Result<(), SolverFailure> {
        if self.counts.total() == 0 {
            return Err(SolverFailure::InvalidBlockCounts);
        }
        if self.lazors.is_empty() {
            return Err(SolverFailure::NoLazors);
        }
        if self.open.is_empty() {
            return Err(SolverFailure::NoOpenCells);
        }
        Ok(())
    }

    /// Find a placement of the movable blocks that routes the lazors through every point.
    ///
    /// Fails only if [`Self::check`] does; running out of candidates is [`SearchOutcome::NotFound`].
    pub fn solve(&self, config: &SearchConfig) -> Result<SearchOutcome, SolverFailure> {
        self.check()?;
        debug!(
            "searching {}x{} board: {} open cells, {:?}, {} lazors, {} points",
            self.dims.0, self.dims.1, self.open.len(), self.counts, self.lazors.len(), self.points.len()
        );

        Ok(if config.is_parallel() {
            search::search_parallel(self, config.workers)
        } else {
            search::search(self)
        })
    }

    /// Whether `placement` solves this board.
    pub fn evaluate(&self, placement: &Placement) -> bool {
        let mut points = self.points.clone();
        engine::evaluate(placement, &self.lazors, &mut points)
    }

    /// The fixed blocks alone, with nothing movable placed.
    pub fn fixed_placement(&self) -> &Placement {
        &self.fixed
    }

    /// Width and height in cells.
    pub fn dims(&self) -> (usize, usize) {
        (self.dims.0.get(), self.dims.1.get())
    }

    /// The cell at `location`, if it is on the board.
    pub fn cell(&self, location: Location) -> Option<Cell> {
        self.cells.get(location.as_index()).copied()
    }

    /// Cells that accept movable blocks, in the order the search tries them.
    pub fn open_cells(&self) -> &[Location] {
        &self.open
    }

    /// Cells where nothing may be placed.
    pub fn blocked_cells(&self) -> Vec<Location> {
        self.cells.indexed_iter()
            .filter(|(_, cell)| **cell == Cell::Blocked)
            .map(|(index, _)| Location::from(index))
            .collect_vec()
    }

    /// Movable blocks to place.
    pub fn counts(&self) -> BlockCounts {
        self.counts
    }

    /// Light sources, in the order given.
    pub fn lazors(&self) -> &[Lazor] {
        &self.lazors
    }

    /// Points that must be touched, sorted.
    pub fn points(&self) -> Vec<LatticePoint> {
        self.points.iter().copied().sorted().collect_vec()
    }

    /// Print this board with the movable blocks from `placement` filled in.
    pub fn show(&self, placement: &Placement) -> String {
        print(Array2::from_shape_fn(self.cells.raw_dim(), |index| {
            match placement.get(Location::from(index)) {
                Some(block) => block.letter(),
                None => self.cells[index].token(),
            }
        }))
    }
}

/// Dump the specified [`ndarray::Array2`], one line per row.
fn print(board: Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for row in board.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(self.cells.map(Cell::token)))
    }
}
