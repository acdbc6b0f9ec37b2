//! Screen layout of the move log panel.
//!
//! The panel shows one full move per row: white's move in the left half,
//! black's in the right half. Reading the text is left to an OCR backend;
//! this module only resolves which pixels to hand it.

use boardsight_core::{Quad, QuadError};
use serde::{Deserialize, Serialize};

/// Visible rows in the move log.
pub const MOVE_LOG_ROWS: u32 = 12;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("move log rows are numbered from 1")]
    InvalidRow,
    #[error("move log frame {width}x{height} cannot hold {rows} rows of two columns")]
    TooSmall { width: i32, height: i32, rows: u32 },
    #[error(transparent)]
    Quad(#[from] QuadError),
}

/// Half of a move log row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotationLayout {
    frame: Quad,
    rows: u32,
    row_height: i32,
}

impl NotationLayout {
    pub fn new(frame: Quad, rows: u32) -> Result<Self, NotationError> {
        let too_small = NotationError::TooSmall {
            width: frame.width(),
            height: frame.height(),
            rows,
        };
        let row_height = i32::try_from(rows)
            .ok()
            .filter(|&r| r > 0)
            .map(|r| frame.height() / r)
            .ok_or(too_small.clone())?;
        if row_height == 0 || frame.width() < 2 {
            return Err(too_small);
        }
        Ok(Self {
            frame,
            rows,
            row_height,
        })
    }

    /// Layout with the default [`MOVE_LOG_ROWS`].
    pub fn with_default_rows(frame: Quad) -> Result<Self, NotationError> {
        Self::new(frame, MOVE_LOG_ROWS)
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Rectangle of the 1-based row `row`.
    ///
    /// Rows past the last visible one resolve to the last row, where the log
    /// keeps the newest move once it starts scrolling.
    pub fn row_rect(&self, row: u32) -> Result<Quad, NotationError> {
        if row == 0 {
            return Err(NotationError::InvalidRow);
        }
        let idx = (row - 1).min(self.rows - 1) as i32;
        Ok(Quad::from_origin_size(
            self.frame.left(),
            self.frame.top() + self.row_height * idx,
            self.frame.width(),
            self.row_height,
        )?)
    }

    /// Left (white) or right (black) half of row `row`, split at `width / 2`.
    pub fn move_rect(&self, row: u32, side: Side) -> Result<Quad, NotationError> {
        let r = self.row_rect(row)?;
        let half = r.width() / 2;
        let q = match side {
            Side::White => Quad::from_origin_size(r.left(), r.top(), half, r.height())?,
            Side::Black => {
                Quad::from_origin_size(r.left() + half, r.top(), r.width() - half, r.height())?
            }
        };
        Ok(q)
    }
}
