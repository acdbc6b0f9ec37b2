//! High-level facade for the `boardsight-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry, board and classifier crates,
//! - the collaborator seams around them ([`ImageSource`] for screen capture,
//!   [`PointerControl`] for drag gestures),
//! - a [`Session`] that wires a calibrated board frame, an orientation and a
//!   reference library into square identification and move execution,
//! - JSON session configuration.
//!
//! ## Quickstart
//!
//! ```no_run
//! use boardsight::{ScreenshotSource, Session, SessionConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = SessionConfig::load_json("boardsight.json")?;
//! let session = Session::from_config(&cfg)?;
//!
//! let screen = ScreenshotSource::open("screen.png")?;
//! let e4 = session.identify(&screen, "e4")?;
//! println!("e4: {:?} ({:.3})", e4.label, e4.score);
//!
//! let (from, to) = session.plan_move("e2", "e4")?;
//! println!("drag {from} -> {to}");
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `boardsight::core`: points, quads, grid transforms, logging.
//! - `boardsight::board`: squares, orientation, cell tiling, move-log layout.
//! - `boardsight::classify`: preprocessing, SSIM, reference library.

pub use boardsight_board as board;
pub use boardsight_classify as classify;
pub use boardsight_core as core;

pub use boardsight_board::{BoardFrame, GridIndex, Orientation, Side, Square};
pub use boardsight_classify::{ClassificationResult, Preprocessing, ReferenceLibrary};
pub use boardsight_core::{Point, Quad};

mod capture;
mod config;
mod moves;
mod pointer;
mod session;

pub use capture::{capture_checked, CaptureError, ImageSource, ScreenshotSource};
pub use config::{ConfigError, SessionConfig};
pub use moves::{execute_move, plan_move, MoveError};
pub use pointer::{DragGesture, LogPointer, PointerError, PointerControl};
pub use session::{BoardReading, Session, SessionError};
