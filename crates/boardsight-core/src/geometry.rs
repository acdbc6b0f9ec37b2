use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Screen-pixel coordinate.
pub type Point = Point2<i32>;

/// Errors produced when building a [`Quad`] from corners that do not form an
/// axis-aligned rectangle of positive size.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadError {
    #[error("corners are not axis-aligned (left/right edges must be vertical, top/bottom horizontal)")]
    NotAxisAligned,
    /// An extent that does not fit in `i32` is reported as `i32::MIN`.
    #[error("quad has non-positive size (width={width}, height={height})")]
    Degenerate { width: i32, height: i32 },
}

/// Axis-aligned screen rectangle stored as its four corners.
///
/// The corner representation is redundant on purpose for callers that reason
/// about corners (corner sources, gesture endpoints). Construction validates
/// that `top_left.x == bottom_left.x`, `top_right.x == bottom_right.x`,
/// `top_left.y == top_right.y`, `bottom_left.y == bottom_right.y` and that
/// width and height are strictly positive.
///
/// Pixel spans are half-open: a quad covers `[left, right) × [top, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuadCorners", into = "QuadCorners")]
pub struct Quad {
    top_left: Point,
    top_right: Point,
    bottom_left: Point,
    bottom_right: Point,
}

/// Unvalidated wire form of a [`Quad`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct QuadCorners {
    top_left: Point,
    top_right: Point,
    bottom_left: Point,
    bottom_right: Point,
}

impl Quad {
    /// Validate four corners and build a quad.
    pub fn new(
        top_left: Point,
        top_right: Point,
        bottom_left: Point,
        bottom_right: Point,
    ) -> Result<Self, QuadError> {
        if top_left.x != bottom_left.x
            || top_right.x != bottom_right.x
            || top_left.y != top_right.y
            || bottom_left.y != bottom_right.y
        {
            return Err(QuadError::NotAxisAligned);
        }
        match (
            top_right.x.checked_sub(top_left.x),
            bottom_left.y.checked_sub(top_left.y),
        ) {
            (Some(w), Some(h)) if w > 0 && h > 0 => {}
            (w, h) => {
                return Err(QuadError::Degenerate {
                    width: w.unwrap_or(i32::MIN),
                    height: h.unwrap_or(i32::MIN),
                })
            }
        }
        Ok(Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        })
    }

    /// Build a quad from its left/top origin and size.
    pub fn from_origin_size(left: i32, top: i32, width: i32, height: i32) -> Result<Self, QuadError> {
        let right = left
            .checked_add(width)
            .ok_or(QuadError::Degenerate { width, height })?;
        let bottom = top
            .checked_add(height)
            .ok_or(QuadError::Degenerate { width, height })?;
        Self::new(
            Point::new(left, top),
            Point::new(right, top),
            Point::new(left, bottom),
            Point::new(right, bottom),
        )
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[inline]
    pub fn top_right(&self) -> Point {
        self.top_right
    }

    #[inline]
    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    #[inline]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.top_left.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.top_right.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.top_left.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.bottom_left.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right() - self.left()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom() - self.top()
    }

    /// Midpoint, rounded towards the top-left corner.
    pub fn center(&self) -> Point {
        Point::new(
            self.left() + self.width() / 2,
            self.top() + self.height() / 2,
        )
    }

    /// Whether `p` lies inside the half-open span of this quad.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Whether the two quads share at least one pixel.
    pub fn overlaps(&self, other: &Quad) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Corners in TL, TR, BR, BL order.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

impl TryFrom<QuadCorners> for Quad {
    type Error = QuadError;

    fn try_from(c: QuadCorners) -> Result<Self, Self::Error> {
        Quad::new(c.top_left, c.top_right, c.bottom_left, c.bottom_right)
    }
}

impl From<Quad> for QuadCorners {
    fn from(q: Quad) -> Self {
        Self {
            top_left: q.top_left,
            top_right: q.top_right,
            bottom_left: q.bottom_left,
            bottom_right: q.bottom_right,
        }
    }
}

impl std::fmt::Display for Quad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "top,left,width,height: {}, {}, {}, {}",
            self.top(),
            self.left(),
            self.width(),
            self.height()
        )
    }
}
