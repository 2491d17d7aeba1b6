//! Column-major 2D affine matrix

use serde::{Deserialize, Serialize};

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedMatrix {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f64; 6],
}

impl Default for NormalizedMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl NormalizedMatrix {
    pub const IDENTITY: NormalizedMatrix = NormalizedMatrix {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self {
            elements: [a, b, c, d, tx, ty],
        }
    }

    pub fn translation(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `degrees`, positive from the x axis towards the y axis
    pub fn rotation(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Skew by `x_degrees` along x and `y_degrees` along y
    pub fn skew(x_degrees: f64, y_degrees: f64) -> Self {
        Self::new(
            1.0,
            y_degrees.to_radians().tan(),
            x_degrees.to_radians().tan(),
            1.0,
            0.0,
            0.0,
        )
    }

    pub fn transform_point(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let [a, b, c, d, tx, ty] = self.elements;
        (a * x + c * y + tx, b * x + d * y + ty)
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &NormalizedMatrix) -> NormalizedMatrix {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        NormalizedMatrix {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn to_array(&self) -> [f64; 6] {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_point(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_identity() {
        assert!(NormalizedMatrix::default().is_identity());
        assert_eq!(
            NormalizedMatrix::IDENTITY.transform_point((3.0, 4.0)),
            (3.0, 4.0)
        );
    }

    #[test]
    fn test_then_applies_other_first() {
        let m = NormalizedMatrix::translation(10.0, 0.0).then(&NormalizedMatrix::scale(2.0, 2.0));
        assert_eq!(m.transform_point((1.0, 1.0)), (12.0, 2.0));

        let m = NormalizedMatrix::scale(2.0, 2.0).then(&NormalizedMatrix::translation(10.0, 0.0));
        assert_eq!(m.transform_point((1.0, 1.0)), (22.0, 2.0));
    }

    #[test]
    fn test_rotation_degrees() {
        let m = NormalizedMatrix::rotation(90.0);
        assert!(approx_point(m.transform_point((1.0, 0.0)), (0.0, 1.0)));
    }

    #[test]
    fn test_skew() {
        let m = NormalizedMatrix::skew(45.0, 0.0);
        assert!(approx_point(m.transform_point((0.0, 2.0)), (2.0, 2.0)));
        let m = NormalizedMatrix::skew(0.0, 45.0);
        assert!(approx_point(m.transform_point((2.0, 0.0)), (2.0, 2.0)));
    }
}
