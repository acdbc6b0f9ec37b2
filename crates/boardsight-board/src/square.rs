use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Malformed algebraic coordinate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square {input:?} (expected a file a-h followed by a rank 1-8)")]
    Invalid { input: String },
}

/// A board square in algebraic notation, stored as zero-based file/rank.
///
/// `file` 0 is the a-file, `rank` 0 is the first rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub(crate) fn from_parts(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Self { file, rank }
    }

    /// Parse `[a-h][1-8]`. Anything else, including upper-case files and
    /// surrounding whitespace, is rejected.
    pub fn parse(input: &str) -> Result<Self, SquareError> {
        match input.as_bytes() {
            &[f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(Self {
                file: f - b'a',
                rank: r - b'1',
            }),
            _ => Err(SquareError::Invalid {
                input: input.to_string(),
            }),
        }
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// All 64 squares, a1, b1, ..., h1, a2, ..., h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parse(s)
    }
}

impl TryFrom<String> for Square {
    type Error = SquareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Square::parse(&s)
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}
