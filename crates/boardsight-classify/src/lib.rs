//! Piece identification for screen-captured board cells.
//!
//! A cell image is compared against every entry of a [`ReferenceLibrary`]
//! (one image per label, loaded from a directory tree) with a windowed
//! structural similarity score. The best-scoring label wins; ties keep the
//! entry that comes first in path order.
//!
//! ## Quickstart
//!
//! ```no_run
//! use boardsight_classify::{LibraryParams, PieceClassifierStrategy, Preprocessing, ReferenceLibrary, SsimClassifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let library = ReferenceLibrary::load_dir("pieces", &LibraryParams::default())?;
//! let classifier = SsimClassifier::new(Preprocessing::Grayscale);
//!
//! let cell = image::open("cell.png")?;
//! let result = classifier.classify(&cell, &library)?;
//! println!("{:?} ({:.3})", result.label, result.score);
//! # Ok(())
//! # }
//! ```
//!
//! Preprocessing is pluggable: any [`Preprocess`] implementation (including a
//! plain closure) is applied identically to the cell and to each resized
//! reference before scoring.

mod classifier;
mod library;
mod preprocess;
mod ssim;
mod threshold;

pub use classifier::{
    classify, ClassificationResult, ClassifyError, PieceClassifierStrategy, SsimClassifier,
};
pub use library::{LibraryError, LibraryParams, ReferenceImage, ReferenceLibrary, SkippedReference};
pub use preprocess::{Preprocess, Preprocessing};
pub use ssim::{mean_ssim, SsimParams};
