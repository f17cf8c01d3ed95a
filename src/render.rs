//! Raster pictures of a board and a placement, with every lazor's path drawn over it.

use std::path::Path;

use image::{ImageBuffer, ImageResult, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::board::Board;
use crate::cell::{Block, Cell};
use crate::engine;
use crate::location::{LatticePoint, Location};
use crate::placement::Placement;

/// Side of one cell, in pixels.
pub const TILE: u32 = 50;
const HALF: u32 = TILE / 2;
// room around the grid so border points are drawn whole
const MARGIN: u32 = HALF;
const POINT_RADIUS: i32 = 6;

struct Colors;

impl Colors {
    const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
    const GRID_LINE: Rgb<u8> = Rgb([90, 90, 90]);
    const OPEN: Rgb<u8> = Rgb([200, 200, 200]);
    const BLOCKED: Rgb<u8> = Rgb([128, 128, 128]);
    const REFLECTOR: Rgb<u8> = Rgb([245, 245, 245]);
    const OPAQUE: Rgb<u8> = Rgb([20, 20, 20]);
    const SPLITTER: Rgb<u8> = Rgb([121, 166, 242]);
    const RAY: Rgb<u8> = Rgb([255, 0, 0]);
    const POINT: Rgb<u8> = Rgb([255, 165, 0]);
}

fn cell_color(cell: Cell, placed: Option<Block>) -> Rgb<u8> {
    match placed {
        Some(Block::Reflector) => Colors::REFLECTOR,
        Some(Block::Opaque) => Colors::OPAQUE,
        Some(Block::Splitter) => Colors::SPLITTER,
        None => match cell {
            Cell::Blocked => Colors::BLOCKED,
            _ => Colors::OPEN,
        },
    }
}

fn to_pixels(point: LatticePoint) -> (i32, i32) {
    (
        MARGIN as i32 + point.0 * HALF as i32,
        MARGIN as i32 + point.1 * HALF as i32,
    )
}

// three pixels wide
fn draw_ray(image: &mut RgbImage, from: LatticePoint, to: LatticePoint) {
    let (fx, fy) = to_pixels(from);
    let (tx, ty) = to_pixels(to);
    for offset in [-1.0, 0.0, 1.0] {
        draw_line_segment_mut(image, (fx as f32 + offset, fy as f32), (tx as f32 + offset, ty as f32), Colors::RAY);
        draw_line_segment_mut(image, (fx as f32, fy as f32 + offset), (tx as f32, ty as f32 + offset), Colors::RAY);
    }
}

/// Draw `board` with `placement`'s blocks, the path of every lazor and the target points.
pub fn render(board: &Board, placement: &Placement) -> RgbImage {
    let (width, height) = board.dims();
    let mut image: RgbImage = ImageBuffer::from_pixel(
        width as u32 * TILE + 2 * MARGIN,
        height as u32 * TILE + 2 * MARGIN,
        Colors::BACKGROUND,
    );

    for row in 0..height {
        for col in 0..width {
            let location = Location(col, row);
            let cell = board.cell(location).unwrap_or_default();
            let tile = Rect::at((MARGIN + col as u32 * TILE) as i32, (MARGIN + row as u32 * TILE) as i32)
                .of_size(TILE, TILE);
            draw_filled_rect_mut(&mut image, tile, cell_color(cell, placement.get(location)));
            draw_hollow_rect_mut(&mut image, tile, Colors::GRID_LINE);
        }
    }

    for lazor in board.lazors() {
        for (from, to) in engine::trace(placement, lazor).segments {
            draw_ray(&mut image, from, to);
        }
        draw_filled_circle_mut(&mut image, to_pixels(lazor.origin()), POINT_RADIUS, Colors::RAY);
    }

    for point in board.points() {
        let centre = to_pixels(point);
        draw_filled_circle_mut(&mut image, centre, POINT_RADIUS, Colors::POINT);
        draw_filled_circle_mut(&mut image, centre, POINT_RADIUS / 2, Colors::BACKGROUND);
    }

    image
}

/// [`render`] and write the picture to `path`; the format follows the file extension.
pub fn save(board: &Board, placement: &Placement, path: impl AsRef<Path>) -> ImageResult<()> {
    render(board, placement).save(path)
}
