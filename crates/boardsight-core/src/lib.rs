//! Core types and utilities for reading a chessboard rendered on screen.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete image decoder, capture backend or pointer driver.

mod geometry;
mod grid_alignment;
mod image;
mod logger;

pub use geometry::{Point, Quad, QuadError};
pub use grid_alignment::{GridAlignment, GridTransform};
pub use image::GrayImageView;

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, TracingFormat};

pub use logger::{init_with_level, level_from_verbosity};
