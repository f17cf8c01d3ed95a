#![warn(missing_docs)]

//! # `lazors`
//!
//! A solver for Lazors puzzles: place a pool of movable optical blocks on a grid so that the lazors,
//! bouncing, splitting and being absorbed on the way, pass through every target point.
//! Load a puzzle with [`bff::parse`] or build one with a [`BoardBuilder`](builder::BoardBuilder),
//! then call [`solve()`](crate::Board::solve) to get a [`Placement`] or learn that none exists.
//!
//! # Internals
//! Positions live on a lattice of half cells stored as doubled integers, so every comparison is exact.
//! A ray always sits on the midpoint of a cell edge; a cell `(c, r)` spans `2c..=2c + 2` by `2r..=2r + 2`.
//!
//! A high level overview is as follows:
//!
//! 1. The search chooses cells for the reflectors (`A`) from the open cells, then cells for the opaque blocks (`B`)
//!    from what is left, then cells for the splitters (`C`) from what is left after that.
//!    Each level walks its combinations in a fixed order, so the first solution found is always the same.
//! 2. Each candidate is merged with the fixed blocks into a [`Placement`] and handed to the engine,
//!    which traces every lazor and its branches and reports whether all points were touched.
//!    Ray states already traced are never traced again, so loops between reflectors terminate.
//! 3. The first candidate that works is returned. Candidates can also be spread over worker threads,
//!    in which case any working candidate may be the one returned.

pub use board::Board;
pub use builder::BoardBuilder;
pub use cell::{Block, BlockCounts, Cell};
pub use config::SearchConfig;
pub use error::{LoadError, SolverFailure};
pub use location::{LatticePoint, Location};
pub use placement::{Placement, PlacementConflict};
pub use ray::{Contact, Heading, Lazor, Ray};
pub use search::SearchOutcome;

pub(crate) mod board;
pub mod builder;
pub(crate) mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub(crate) mod location;
pub(crate) mod placement;
pub(crate) mod ray;
pub mod search;
pub mod bff;
pub mod render;
#[cfg(feature = "wasm")]
pub mod wasm;
