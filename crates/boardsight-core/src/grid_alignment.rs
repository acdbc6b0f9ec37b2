use serde::{Deserialize, Serialize};

/// Integer 2D linear transform `(c', r') = (a*c + b*r, c*c + d*r)` on grid
/// coordinates.
///
/// Only unimodular transforms (det = ±1) are invertible; board orientations
/// use the two axis mirrors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTransform {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
}

impl GridTransform {
    pub const IDENTITY: GridTransform = GridTransform {
        a: 1,
        b: 0,
        c: 0,
        d: 1,
    };

    /// Negate the first axis.
    pub const MIRROR_FIRST: GridTransform = GridTransform {
        a: -1,
        b: 0,
        c: 0,
        d: 1,
    };

    /// Negate the second axis.
    pub const MIRROR_SECOND: GridTransform = GridTransform {
        a: 1,
        b: 0,
        c: 0,
        d: -1,
    };

    #[inline]
    pub fn apply(&self, i: i32, j: i32) -> [i32; 2] {
        [self.a * i + self.b * j, self.c * i + self.d * j]
    }

    #[inline]
    pub fn determinant(&self) -> i32 {
        self.a * self.d - self.b * self.c
    }

    pub fn inverse(&self) -> Option<GridTransform> {
        let det = self.determinant();
        if det != 1 && det != -1 {
            return None;
        }
        Some(GridTransform {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
        })
    }
}

/// A grid alignment `dst = transform(src) + translation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridAlignment {
    pub transform: GridTransform,
    pub translation: [i32; 2],
}

impl GridAlignment {
    pub const IDENTITY: GridAlignment = GridAlignment {
        transform: GridTransform::IDENTITY,
        translation: [0, 0],
    };

    #[inline]
    pub fn map(&self, i: i32, j: i32) -> [i32; 2] {
        let [x, y] = self.transform.apply(i, j);
        [x + self.translation[0], y + self.translation[1]]
    }

    pub fn inverse(&self) -> Option<GridAlignment> {
        let inv = self.transform.inverse()?;
        let [tx, ty] = self.translation;
        let [itx, ity] = inv.apply(-tx, -ty);
        Some(GridAlignment {
            transform: inv,
            translation: [itx, ity],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_then_translate_inverts_exactly() {
        let flip_rows = GridAlignment {
            transform: GridTransform::MIRROR_SECOND,
            translation: [0, 7],
        };
        let inv = flip_rows.inverse().expect("unimodular");
        for i in 0..8 {
            for j in 0..8 {
                let [x, y] = flip_rows.map(i, j);
                assert_eq!(inv.map(x, y), [i, j]);
            }
        }
    }

    #[test]
    fn singular_transform_has_no_inverse() {
        let t = GridTransform {
            a: 2,
            b: 0,
            c: 0,
            d: 1,
        };
        assert!(t.inverse().is_none());
    }
}
