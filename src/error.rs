//! Errors for loading, configuring and starting a solve.

use thiserror::Error;

use crate::builder::BuilderInvalidReason;

/// Reasons a board is refused before any search starts.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum SolverFailure {
    /// No movable blocks of any kind, so there is nothing to search over.
    #[error("the puzzle has no movable blocks to place")]
    InvalidBlockCounts,
    /// Nothing emits light.
    #[error("the puzzle has no lazors")]
    NoLazors,
    /// No cell accepts a movable block.
    #[error("the puzzle has no open cells")]
    NoOpenCells,
}

/// Reasons a `.bff` puzzle could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line that does not parse; `line` counts from 1.
    #[error("line {line}: {message}")]
    Syntax {
        /// Line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// No grid, or an empty one.
    #[error("no GRID START section")]
    MissingGrid,

    /// The grid opened on `line` runs to the end of the file.
    #[error("GRID START on line {line} is never closed by GRID STOP")]
    UnterminatedGrid {
        /// Line of the `GRID START`.
        line: usize,
    },

    /// The file parsed, but describes an impossible board.
    #[error("invalid puzzle: {0:?}")]
    Invalid(Vec<BuilderInvalidReason>),
}

impl LoadError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        LoadError::Syntax { line, message: message.into() }
    }
}

/// Reasons a [`SearchConfig`](crate::config::SearchConfig) could not be read.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// A worker count that is neither a number nor `auto`.
    #[error("invalid worker count {0:?}: expected a number or \"auto\"")]
    InvalidWorkers(String),
}
