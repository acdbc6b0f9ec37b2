//! JSON session configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use boardsight_board::Orientation;
use boardsight_classify::{LibraryParams, Preprocessing};
use boardsight_core::{Quad, QuadError};
use serde::{Deserialize, Serialize};

use crate::pointer::DragGesture;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_settle_ms() -> u64 {
    100
}

/// Everything a session needs that is fixed for its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Calibrated screen corners of the playable board.
    pub board: Quad,
    /// Calibrated screen corners of the move log panel, if one is read.
    #[serde(default)]
    pub notation: Option<Quad>,
    pub orientation: Orientation,
    /// Root of the reference piece images.
    pub pieces_dir: PathBuf,
    #[serde(default)]
    pub preprocessing: Preprocessing,
    #[serde(default)]
    pub library: LibraryParams,
    /// Matches scoring below this are reported without a label.
    #[serde(default)]
    pub min_score: Option<f32>,
    /// Pause between reaching the source square and starting the drag.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl SessionConfig {
    /// Template using the full-screen calibration the tool was first tuned on
    /// (board at (191, 173)–(793, 774), move log at (860, 223)–(1005, 583)).
    pub fn template(pieces_dir: impl Into<PathBuf>, orientation: Orientation) -> Result<Self, QuadError> {
        Ok(Self {
            board: Quad::from_origin_size(191, 173, 602, 601)?,
            notation: Some(Quad::from_origin_size(860, 223, 145, 360)?),
            orientation,
            pieces_dir: pieces_dir.into(),
            preprocessing: Preprocessing::default(),
            library: LibraryParams::default(),
            min_score: None,
            settle_ms: default_settle_ms(),
        })
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn gesture(&self) -> DragGesture {
        DragGesture {
            settle: Duration::from_millis(self.settle_ms),
        }
    }
}
