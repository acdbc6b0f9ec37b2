//! Session pipeline: square → cell → capture → classification.

use std::fmt;

use boardsight_board::{
    cell_rect, to_grid, BoardFrame, FixedCorners, FrameError, NotationError, NotationLayout,
    Orientation, Side, Square, SquareError,
};
use boardsight_classify::{
    ClassificationResult, ClassifyError, LibraryError, PieceClassifierStrategy, ReferenceLibrary,
    SsimClassifier,
};
use boardsight_core::{Point, Quad};
use image::DynamicImage;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::capture::{capture_checked, CaptureError, ImageSource, ScreenshotSource};
use crate::config::SessionConfig;
use crate::moves::{execute_move, plan_move, MoveError};
use crate::pointer::{DragGesture, PointerControl};

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Square(#[from] SquareError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("no move log region is configured")]
    NoMoveLog,
}

/// Immutable per-session state: calibrated frame, orientation, reference
/// library and classifier.
pub struct Session {
    frame: BoardFrame,
    orientation: Orientation,
    notation: Option<NotationLayout>,
    library: ReferenceLibrary,
    classifier: Box<dyn PieceClassifierStrategy + Send + Sync>,
    gesture: DragGesture,
}

impl Session {
    pub fn new(
        frame: BoardFrame,
        orientation: Orientation,
        library: ReferenceLibrary,
        classifier: impl PieceClassifierStrategy + Send + Sync + 'static,
    ) -> Self {
        Self {
            frame,
            orientation,
            notation: None,
            library,
            classifier: Box::new(classifier),
            gesture: DragGesture::default(),
        }
    }

    /// Build the frame, load the reference library and set up an SSIM
    /// classifier as described by `cfg`.
    pub fn from_config(cfg: &SessionConfig) -> Result<Self, SessionError> {
        let frame = BoardFrame::detect(&FixedCorners(cfg.board))?;
        let library = ReferenceLibrary::load_dir(&cfg.pieces_dir, &cfg.library)?;
        let classifier = SsimClassifier::new(cfg.preprocessing).with_min_score(cfg.min_score);
        let mut session = Self::new(frame, cfg.orientation, library, classifier)
            .with_gesture(cfg.gesture());
        if let Some(quad) = cfg.notation {
            session = session.with_notation(NotationLayout::with_default_rows(quad)?);
        }
        Ok(session)
    }

    pub fn with_notation(mut self, layout: NotationLayout) -> Self {
        self.notation = Some(layout);
        self
    }

    pub fn with_gesture(mut self, gesture: DragGesture) -> Self {
        self.gesture = gesture;
        self
    }

    #[inline]
    pub fn frame(&self) -> &BoardFrame {
        &self.frame
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn library(&self) -> &ReferenceLibrary {
        &self.library
    }

    /// Re-read the reference directory, e.g. after the piece set changed.
    pub fn reload_library(&mut self) -> Result<(), SessionError> {
        Ok(self.library.reload()?)
    }

    /// Screen rectangle of `square`.
    pub fn square_rect(&self, square: &str) -> Result<Quad, SessionError> {
        Ok(cell_rect(&self.frame, to_grid(square, self.orientation)?))
    }

    pub fn capture_square(
        &self,
        source: &dyn ImageSource,
        square: &str,
    ) -> Result<DynamicImage, SessionError> {
        let rect = self.square_rect(square)?;
        Ok(capture_checked(source, &rect)?)
    }

    /// Identify the piece on one square.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self, source)))]
    pub fn identify(
        &self,
        source: &dyn ImageSource,
        square: &str,
    ) -> Result<ClassificationResult, SessionError> {
        let cell = self.capture_square(source, square)?;
        let result = self.classifier.classify(&cell, &self.library)?;
        log::debug!("{square}: {:?} ({:.3})", result.label, result.score);
        Ok(result)
    }

    /// Capture the whole frame once and classify all 64 cells.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self, source)))]
    pub fn read_board(&self, source: &dyn ImageSource) -> Result<BoardReading, SessionError> {
        let board = self.capture_board(source)?;
        let mut results = vec![ClassificationResult::no_match(); 64];
        for square in Square::all() {
            let rect = cell_rect(&self.frame, self.orientation.to_grid(square));
            let cell = capture_checked(&board, &rect)?;
            results[square_slot(square)] = self.classifier.classify(&cell, &self.library)?;
        }
        Ok(BoardReading {
            orientation: self.orientation,
            results,
        })
    }

    /// Snapshot of the board frame, addressable in screen coordinates.
    pub fn capture_board(&self, source: &dyn ImageSource) -> Result<ScreenshotSource, SessionError> {
        let quad = self.frame.quad();
        let img = capture_checked(source, &quad)?;
        Ok(ScreenshotSource::new(img).with_origin(quad.top_left()))
    }

    pub fn plan_move(&self, from: &str, to: &str) -> Result<(Point, Point), SessionError> {
        Ok(plan_move(from, to, &self.frame, self.orientation)?)
    }

    /// Drag a piece from `from` to `to` with the session's gesture timing.
    pub fn execute_move(
        &self,
        pointer: &mut dyn PointerControl,
        from: &str,
        to: &str,
    ) -> Result<(Point, Point), SessionError> {
        Ok(execute_move(
            from,
            to,
            &self.frame,
            self.orientation,
            pointer,
            &self.gesture,
        )?)
    }

    /// Rectangle of one side's move in 1-based move-log row `row`.
    pub fn move_log_rect(&self, row: u32, side: Side) -> Result<Quad, SessionError> {
        let layout = self.notation.as_ref().ok_or(SessionError::NoMoveLog)?;
        Ok(layout.move_rect(row, side)?)
    }

    /// Capture one move-log entry for an external text recognizer.
    pub fn capture_move(
        &self,
        source: &dyn ImageSource,
        row: u32,
        side: Side,
    ) -> Result<DynamicImage, SessionError> {
        let rect = self.move_log_rect(row, side)?;
        Ok(capture_checked(source, &rect)?)
    }
}

fn square_slot(square: Square) -> usize {
    square.rank() as usize * 8 + square.file() as usize
}

/// Classification of all 64 squares.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardReading {
    orientation: Orientation,
    results: Vec<ClassificationResult>,
}

impl BoardReading {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn get(&self, square: Square) -> &ClassificationResult {
        &self.results[square_slot(square)]
    }

    /// Squares with their results, a1 first.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &ClassificationResult)> {
        Square::all().map(move |sq| (sq, self.get(sq)))
    }

    /// Lowest score over all squares; a quick confidence check.
    pub fn min_score(&self) -> f32 {
        self.results
            .iter()
            .map(|r| r.score)
            .fold(f32::INFINITY, f32::min)
    }
}

/// Text diagram from white's point of view, `.` for unlabeled squares.
impl fmt::Display for BoardReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .results
            .iter()
            .filter_map(|r| r.label.as_ref().map(String::len))
            .max()
            .unwrap_or(1);
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square::new(file, rank).ok_or(fmt::Error)?;
                let label = self.get(sq).label.as_deref().unwrap_or(".");
                write!(f, " {label:<width$}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in 'a'..='h' {
            write!(f, " {file:<width$}")?;
        }
        writeln!(f)
    }
}
