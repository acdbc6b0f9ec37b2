use boardsight_core::{Quad, QuadError};

use crate::region::{tile_board, BOARD_SIZE};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("board frame {width}x{height} is too small (need at least 8x8 pixels)")]
    TooSmall { width: i32, height: i32 },
    #[error(transparent)]
    Quad(#[from] QuadError),
}

/// Supplier of the four screen corners of the playable board area.
///
/// Sessions use [`FixedCorners`] read from configuration; a live
/// detector would be another implementation of this trait.
pub trait CornerSource {
    fn detect_corners(&self) -> Result<Quad, FrameError>;
}

/// Calibrated corners read from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedCorners(pub Quad);

impl CornerSource for FixedCorners {
    fn detect_corners(&self) -> Result<Quad, FrameError> {
        Ok(self.0)
    }
}

/// Validated board area together with its precomputed 8×8 tiling.
///
/// Immutable for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardFrame {
    quad: Quad,
    cells: Vec<Quad>,
}

impl BoardFrame {
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(quad), fields(quad = %quad)))]
    pub fn new(quad: Quad) -> Result<Self, FrameError> {
        if quad.width() < BOARD_SIZE || quad.height() < BOARD_SIZE {
            return Err(FrameError::TooSmall {
                width: quad.width(),
                height: quad.height(),
            });
        }
        let cells = tile_board(&quad)?;
        log::debug!("board frame {quad}, {} cells", cells.len());
        Ok(Self { quad, cells })
    }

    /// Ask `source` for the corners once and build the frame.
    pub fn detect(source: &dyn CornerSource) -> Result<Self, FrameError> {
        Self::new(source.detect_corners()?)
    }

    #[inline]
    pub fn quad(&self) -> Quad {
        self.quad
    }

    /// Cells in row-major screen order (64 entries).
    #[inline]
    pub fn cells(&self) -> &[Quad] {
        &self.cells
    }
}
