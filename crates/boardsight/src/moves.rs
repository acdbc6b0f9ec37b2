//! Move planning and execution.

use boardsight_board::{cell_center, to_grid, BoardFrame, Orientation, SquareError};
use boardsight_core::Point;

use crate::pointer::{DragGesture, PointerControl, PointerError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error(transparent)]
    Square(#[from] SquareError),
    #[error(transparent)]
    Pointer(#[from] PointerError),
}

/// Screen centers of the `from` and `to` squares.
///
/// Both squares are validated before anything is returned.
pub fn plan_move(
    from: &str,
    to: &str,
    frame: &BoardFrame,
    orientation: Orientation,
) -> Result<(Point, Point), SquareError> {
    let src = cell_center(frame, to_grid(from, orientation)?);
    let dst = cell_center(frame, to_grid(to, orientation)?);
    log::debug!("planned {from}{to}: {src} -> {dst}");
    Ok((src, dst))
}

/// Plan the move and hand it to `pointer` as a drag gesture.
///
/// Returns the endpoints that were used.
pub fn execute_move(
    from: &str,
    to: &str,
    frame: &BoardFrame,
    orientation: Orientation,
    pointer: &mut dyn PointerControl,
    gesture: &DragGesture,
) -> Result<(Point, Point), MoveError> {
    let (src, dst) = plan_move(from, to, frame, orientation)?;
    gesture.perform(pointer, src, dst)?;
    Ok((src, dst))
}
