//! Loader for the `.bff` puzzle format.
//!
//! ```text
//! # comments and blank lines are ignored
//! GRID START
//! o B o
//! o o x
//! GRID STOP
//! A 2
//! L 2 3 1 -1
//! P 3 0
//! ```
//!
//! Grid tokens are `o` (open), `x` (blocked) and `A`/`B`/`C` (fixed blocks), and may be written with or without spaces.
//! `A n`, `B n` and `C n` give movable block counts, `L x y vx vy` a lazor and `P x y` a target point,
//! all in doubled lattice coordinates.

use std::fs;
use std::num::NonZero;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use strum::VariantArray;

use crate::board::Board;
use crate::builder::BoardBuilder;
use crate::cell::{Block, Cell};
use crate::error::LoadError;
use crate::location::LatticePoint;

const GRID_START: &str = "GRID START";
const GRID_STOP: &str = "GRID STOP";

enum Section {
    BeforeGrid,
    Grid { start: usize },
    AfterGrid,
}

fn parse_cell(line: usize, token: char) -> Result<Cell, LoadError> {
    match token {
        'o' => Ok(Cell::Open),
        'x' => Ok(Cell::Blocked),
        _ => Block::from_str(&token.to_string())
            .map(Cell::Fixed)
            .map_err(|_| LoadError::syntax(line, format!("unknown grid token {token:?}"))),
    }
}

fn parse_numbers<T: FromStr>(line: usize, tokens: &[&str]) -> Result<Vec<T>, LoadError> {
    tokens.iter()
        .map(|token| token.parse().map_err(|_| LoadError::syntax(line, format!("expected a number, got {token:?}"))))
        .collect()
}

fn expect_arity(line: usize, tokens: &[&str], arity: usize) -> Result<(), LoadError> {
    if tokens.len() != arity {
        return Err(LoadError::syntax(
            line,
            format!("{:?} takes {} values, got {}", tokens[0], arity - 1, tokens.len() - 1),
        ));
    }
    Ok(())
}

/// Parse a puzzle from `.bff` text.
///
/// Only the file's own consistency is checked here. A puzzle with no lazors or no movable blocks loads fine
/// and is refused later by [`Board::solve`].
pub fn parse(source: &str) -> Result<Board, LoadError> {
    let mut section = Section::BeforeGrid;
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    // indexed like Block::VARIANTS
    let mut counts: [Option<usize>; 3] = [None; 3];
    let mut lazors: Vec<(LatticePoint, (i32, i32))> = Vec::new();
    let mut points: Vec<LatticePoint> = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        if let Section::Grid { .. } = section {
            if text == GRID_STOP {
                section = Section::AfterGrid;
                continue;
            }

            let row = text.chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| parse_cell(line, c))
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(LoadError::syntax(line, format!("row has {} cells, expected {}", row.len(), first.len())));
                }
            }
            rows.push(row);
            continue;
        }

        if text == GRID_START {
            if let Section::AfterGrid = section {
                return Err(LoadError::syntax(line, "a second grid"));
            }
            section = Section::Grid { start: line };
            continue;
        }

        let tokens = text.split_whitespace().collect::<Vec<_>>();
        match tokens[0] {
            "A" | "B" | "C" => {
                expect_arity(line, &tokens, 2)?;
                let block = Block::from_str(tokens[0]).map_err(|_| LoadError::syntax(line, "unknown block"))?;
                let slot = &mut counts[block as usize];
                if slot.is_some() {
                    return Err(LoadError::syntax(line, format!("count for {block} given twice")));
                }
                *slot = Some(parse_numbers::<usize>(line, &tokens[1..])?[0]);
            }
            "L" => {
                expect_arity(line, &tokens, 5)?;
                let values = parse_numbers::<i32>(line, &tokens[1..])?;
                lazors.push((LatticePoint(values[0], values[1]), (values[2], values[3])));
            }
            "P" => {
                expect_arity(line, &tokens, 3)?;
                let values = parse_numbers::<i32>(line, &tokens[1..])?;
                points.push(LatticePoint(values[0], values[1]));
            }
            other => return Err(LoadError::syntax(line, format!("unknown directive {other:?}"))),
        }
    }

    match section {
        Section::BeforeGrid => return Err(LoadError::MissingGrid),
        Section::Grid { start } => return Err(LoadError::UnterminatedGrid { line: start }),
        Section::AfterGrid => {}
    }

    let height = NonZero::new(rows.len()).ok_or(LoadError::MissingGrid)?;
    let width = NonZero::new(rows[0].len()).ok_or(LoadError::MissingGrid)?;

    let mut builder = BoardBuilder::with_dims((width, height));
    for (y, row) in rows.iter().enumerate() {
        builder.set_row(y, row);
    }
    for (block, count) in Block::VARIANTS.iter().copied().zip(counts) {
        builder.movable(block, count.unwrap_or(0));
    }
    for (origin, velocity) in lazors {
        builder.add_lazor(origin, velocity);
    }
    for point in points {
        builder.add_point(point);
    }

    let board = builder.build().map_err(|reasons| LoadError::Invalid(reasons.clone()))?;
    debug!("loaded {}x{} puzzle", width, height);
    Ok(board)
}

/// Read and [`parse`] a `.bff` file.
pub fn load(path: impl AsRef<Path>) -> Result<Board, LoadError> {
    parse(&fs::read_to_string(path)?)
}

impl FromStr for Board {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
