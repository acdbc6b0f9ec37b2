use std::fmt;
use std::str::FromStr;

use boardsight_core::{GridAlignment, GridTransform};
use serde::{Deserialize, Serialize};

use crate::square::{Square, SquareError};

/// Which side of the board is rendered at the bottom of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[serde(alias = "white")]
    WhiteAtBottom,
    #[serde(alias = "black")]
    BlackAtBottom,
}

/// Zero-based cell address in screen-rendering order.
///
/// `row` 0 is the visually topmost row, `col` 0 the visually leftmost column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "GridParts", into = "GridParts")]
pub struct GridIndex {
    col: u8,
    row: u8,
}

/// Unvalidated wire form of a [`GridIndex`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct GridParts {
    col: u8,
    row: u8,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("grid index ({col}, {row}) is outside the 8x8 board")]
pub struct GridIndexError {
    pub col: u8,
    pub row: u8,
}

impl TryFrom<GridParts> for GridIndex {
    type Error = GridIndexError;

    fn try_from(p: GridParts) -> Result<Self, Self::Error> {
        GridIndex::new(p.col, p.row).ok_or(GridIndexError {
            col: p.col,
            row: p.row,
        })
    }
}

impl From<GridIndex> for GridParts {
    fn from(idx: GridIndex) -> Self {
        Self {
            col: idx.col,
            row: idx.row,
        }
    }
}

impl GridIndex {
    pub fn new(col: u8, row: u8) -> Option<Self> {
        (col < 8 && row < 8).then_some(Self { col, row })
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    /// Row-major position in `0..64`.
    #[inline]
    pub fn linear(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// All 64 indices in row-major screen order.
    pub fn all() -> impl Iterator<Item = GridIndex> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| GridIndex { col, row }))
    }
}

impl Orientation {
    /// Alignment taking `(file, rank)` indices to `(col, row)`.
    ///
    /// White at the bottom mirrors ranks (rank 8 is row 0); black at the
    /// bottom mirrors files (the h-file is column 0). Both are involutions on
    /// `[0, 7]²`, so the same alignment maps a grid index back to its square.
    pub fn alignment(self) -> GridAlignment {
        match self {
            Orientation::WhiteAtBottom => GridAlignment {
                transform: GridTransform::MIRROR_SECOND,
                translation: [0, 7],
            },
            Orientation::BlackAtBottom => GridAlignment {
                transform: GridTransform::MIRROR_FIRST,
                translation: [7, 0],
            },
        }
    }

    /// Screen cell of `square` for this orientation.
    pub fn to_grid(self, square: Square) -> GridIndex {
        let [col, row] = self
            .alignment()
            .map(i32::from(square.file()), i32::from(square.rank()));
        GridIndex {
            col: col as u8,
            row: row as u8,
        }
    }

    /// Square rendered at `idx` for this orientation.
    pub fn to_square(self, idx: GridIndex) -> Square {
        let [file, rank] = self
            .alignment()
            .map(i32::from(idx.col), i32::from(idx.row));
        Square::from_parts(file as u8, rank as u8)
    }

    /// The opposite point of view.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::WhiteAtBottom => Orientation::BlackAtBottom,
            Orientation::BlackAtBottom => Orientation::WhiteAtBottom,
        }
    }
}

/// Parse `square` and map it to a grid index.
///
/// Fails with [`SquareError::Invalid`] for anything outside `[a-h][1-8]`;
/// there is no fallback square.
pub fn to_grid(square: &str, orientation: Orientation) -> Result<GridIndex, SquareError> {
    Ok(orientation.to_grid(Square::parse(square)?))
}

/// Orientation parse failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid orientation {0:?} (expected white/w or black/b)")]
pub struct ParseOrientationError(String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "white" | "white_at_bottom" => Ok(Orientation::WhiteAtBottom),
            "b" | "black" | "black_at_bottom" => Ok(Orientation::BlackAtBottom),
            _ => Err(ParseOrientationError(s.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::WhiteAtBottom => "white",
            Orientation::BlackAtBottom => "black",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(square: &str, o: Orientation) -> (u8, u8) {
        let idx = to_grid(square, o).unwrap();
        (idx.col(), idx.row())
    }

    #[test]
    fn white_at_bottom_puts_rank_eight_on_top() {
        assert_eq!(grid("a8", Orientation::WhiteAtBottom), (0, 0));
        assert_eq!(grid("h1", Orientation::WhiteAtBottom), (7, 7));
        assert_eq!(grid("e4", Orientation::WhiteAtBottom), (4, 4));
    }

    #[test]
    fn black_at_bottom_rotates_the_board() {
        assert_eq!(grid("a8", Orientation::BlackAtBottom), (7, 7));
        assert_eq!(grid("h1", Orientation::BlackAtBottom), (0, 0));
        assert_eq!(grid("e4", Orientation::BlackAtBottom), (3, 3));
    }

    #[test]
    fn invalid_square_is_an_error_not_a1() {
        for o in [Orientation::WhiteAtBottom, Orientation::BlackAtBottom] {
            assert!(matches!(to_grid("z9", o), Err(SquareError::Invalid { .. })));
        }
    }

    #[test]
    fn to_square_inverts_to_grid() {
        for o in [Orientation::WhiteAtBottom, Orientation::BlackAtBottom] {
            for sq in Square::all() {
                assert_eq!(o.to_square(o.to_grid(sq)), sq);
            }
            assert_eq!(o.alignment().inverse(), Some(o.alignment()));
        }
    }

    #[test]
    fn grid_index_json_is_range_checked() {
        let idx: GridIndex = serde_json::from_str(r#"{"col":7,"row":0}"#).unwrap();
        assert_eq!(idx, GridIndex::new(7, 0).unwrap());
        assert_eq!(serde_json::to_string(&idx).unwrap(), r#"{"col":7,"row":0}"#);

        let err = serde_json::from_str::<GridIndex>(r#"{"col":9,"row":9}"#).unwrap_err();
        assert!(err.to_string().contains("outside the 8x8 board"), "{err}");
        assert!(serde_json::from_str::<GridIndex>(r#"{"col":0,"row":8}"#).is_err());
    }

    #[test]
    fn parses_orientation_names() {
        assert_eq!("w".parse::<Orientation>().unwrap(), Orientation::WhiteAtBottom);
        assert_eq!("Black".parse::<Orientation>().unwrap(), Orientation::BlackAtBottom);
        assert!("x".parse::<Orientation>().is_err());
        let o: Orientation = serde_json::from_str("\"black_at_bottom\"").unwrap();
        assert_eq!(o, Orientation::BlackAtBottom);
        let o: Orientation = serde_json::from_str("\"white\"").unwrap();
        assert_eq!(o.flipped(), Orientation::BlackAtBottom);
    }
}
