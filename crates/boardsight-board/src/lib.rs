//! Board geometry for a chessboard rendered on screen.
//!
//! ## Quickstart
//!
//! ```
//! use boardsight_board::{cell_center, to_grid, BoardFrame, Orientation};
//! use boardsight_core::{Point, Quad};
//!
//! let quad = Quad::from_origin_size(100, 100, 800, 800).unwrap();
//! let frame = BoardFrame::new(quad).unwrap();
//!
//! let idx = to_grid("a8", Orientation::WhiteAtBottom).unwrap();
//! assert_eq!(cell_center(&frame, idx), Point::new(150, 150));
//! ```
//!
//! Pipeline:
//! 1. Parse an algebraic square (`"e4"`) into file/rank indices.
//! 2. Map it to a screen-order [`GridIndex`] for the given [`Orientation`]
//!    (white or black at the bottom of the screen).
//! 3. Tile the [`BoardFrame`] into an 8×8 grid of equal cells using integer
//!    division; the remainder stays uncovered on the right and bottom edges.
//! 4. Look up the cell rectangle or its center.

mod frame;
mod notation;
mod orientation;
mod region;
mod square;

pub use frame::{BoardFrame, CornerSource, FixedCorners, FrameError};
pub use notation::{NotationError, NotationLayout, Side, MOVE_LOG_ROWS};
pub use orientation::{to_grid, GridIndex, GridIndexError, Orientation, ParseOrientationError};
pub use region::{cell_center, cell_rect, cell_size, tile_board, BOARD_SIZE};
pub use square::{Square, SquareError};
