//! Tiling of the board frame into an 8×8 grid of screen cells.

use boardsight_core::{Point, Quad, QuadError};

use crate::frame::BoardFrame;
use crate::orientation::GridIndex;

/// Cells per board side.
pub const BOARD_SIZE: i32 = 8;

/// Width and height of one cell, `frame / 8` with integer division.
///
/// The remainder (at most 7 px per axis) is not redistributed: every cell has
/// the same size and the last column/row of pixels stays outside all cells.
#[inline]
pub fn cell_size(frame: &Quad) -> (i32, i32) {
    (frame.width() / BOARD_SIZE, frame.height() / BOARD_SIZE)
}

/// Split `frame` into 64 cells in row-major screen order.
///
/// Fails if the frame is smaller than 8 px along either axis.
pub fn tile_board(frame: &Quad) -> Result<Vec<Quad>, QuadError> {
    let (cw, ch) = cell_size(frame);
    GridIndex::all()
        .map(|idx| {
            Quad::from_origin_size(
                frame.left() + i32::from(idx.col()) * cw,
                frame.top() + i32::from(idx.row()) * ch,
                cw,
                ch,
            )
        })
        .collect()
}

/// Screen rectangle of one cell.
#[inline]
pub fn cell_rect(frame: &BoardFrame, idx: GridIndex) -> Quad {
    frame.cells()[idx.linear()]
}

/// Midpoint of [`cell_rect`], used as the endpoint of drag gestures.
#[inline]
pub fn cell_center(frame: &BoardFrame, idx: GridIndex) -> Point {
    cell_rect(frame, idx).center()
}
