use std::fmt::{Display, Formatter};

use strum::{EnumString, VariantArray};

/// An optical block. Each variant changes a ray differently when the ray touches it; see [`Block::on_contact`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, EnumString)]
pub enum Block {
    /// Bounces the ray back off the face it touched. Written `A`.
    #[strum(serialize = "A")]
    Reflector,
    /// Absorbs the ray. Written `B`.
    #[strum(serialize = "B")]
    Opaque,
    /// Lets the ray through and also reflects a copy of it. Written `C`.
    #[strum(serialize = "C")]
    Splitter,
}

impl Block {
    /// The letter used for this block in puzzle files and text output.
    pub fn letter(&self) -> char {
        match self {
            Block::Reflector => 'A',
            Block::Opaque => 'B',
            Block::Splitter => 'C',
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One square of the board as loaded, before any movable block is placed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Cell {
    /// A movable block may be placed here.
    #[default]
    Open,
    /// Nothing may be placed here; rays pass through.
    Blocked,
    /// A block fixed in place by the puzzle.
    Fixed(Block),
}

impl Cell {
    pub(crate) fn token(&self) -> char {
        match self {
            Cell::Open => 'o',
            Cell::Blocked => 'x',
            Cell::Fixed(block) => block.letter(),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// How many movable blocks of each kind must be placed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BlockCounts {
    /// Number of [`Block::Reflector`]s.
    pub reflectors: usize,
    /// Number of [`Block::Opaque`] blocks.
    pub opaques: usize,
    /// Number of [`Block::Splitter`]s.
    pub splitters: usize,
}

impl BlockCounts {
    /// Counts in `A`, `B`, `C` order.
    pub fn new(reflectors: usize, opaques: usize, splitters: usize) -> Self {
        Self { reflectors, opaques, splitters }
    }

    /// The count for one kind of block.
    pub fn of(&self, block: Block) -> usize {
        match block {
            Block::Reflector => self.reflectors,
            Block::Opaque => self.opaques,
            Block::Splitter => self.splitters,
        }
    }

    pub(crate) fn of_mut(&mut self, block: Block) -> &mut usize {
        match block {
            Block::Reflector => &mut self.reflectors,
            Block::Opaque => &mut self.opaques,
            Block::Splitter => &mut self.splitters,
        }
    }

    /// All movable blocks together.
    pub fn total(&self) -> usize {
        self.reflectors + self.opaques + self.splitters
    }
}
