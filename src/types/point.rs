//! Planar point type.

use std::fmt;

use geo::Coord;

/// A point in the caller's planar coordinate system.
///
/// No unit conversion is ever applied: geographic degrees, projected metres
/// or local grid units all pass through unchanged.
///
/// # Example
///
/// ```
/// use nest_rs::types::Point2D;
///
/// let a = Point2D::new(0.0, 0.0);
/// let b = Point2D::new(3.0, 4.0);
/// assert_eq!(a.distance(&b), 5.0);
/// assert_eq!(a.lerp(&b, 0.5), Point2D::new(1.5, 2.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2D {
    /// x-coordinate (easting or longitude)
    pub x: f64,
    /// y-coordinate (northing or latitude)
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance (avoids sqrt for comparisons).
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation: self + t * (other - self)
    #[inline]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }

    /// Rotate counter-clockwise by `angle` radians about `center`.
    pub fn rotate_about(&self, center: &Self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Self::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }

    /// Lexicographic (x, then y) ordering using IEEE total order.
    #[inline]
    pub fn total_cmp_xy(&self, other: &Self) -> std::cmp::Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

impl From<Coord<f64>> for Point2D {
    fn from(c: Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

impl From<Point2D> for Coord<f64> {
    fn from(p: Point2D) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_distance() {
        let a = Point2D::new(1.0, 1.0);
        let b = Point2D::new(4.0, 5.0);
        assert!((a.distance(&b) - 5.0).abs() < TOL);
        assert!((a.distance_squared(&b) - 25.0).abs() < TOL);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_finite() {
        assert!(Point2D::new(1.0, 2.0).is_finite());
        assert!(!Point2D::new(f64::NAN, 2.0).is_finite());
        assert!(!Point2D::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let p = Point2D::new(2.0, 1.0);
        let r = p.rotate_about(&Point2D::new(1.0, 1.0), FRAC_PI_2);
        assert!((r.x - 1.0).abs() < TOL);
        assert!((r.y - 2.0).abs() < TOL);
    }

    #[test]
    fn test_conversions() {
        let p: Point2D = (1.5, -2.0).into();
        let c: Coord<f64> = p.into();
        assert_eq!(c.x, 1.5);
        assert_eq!(Point2D::from(c), p);
        let arr: [f64; 2] = p.into();
        assert_eq!(arr, [1.5, -2.0]);
    }

    #[test]
    fn test_total_cmp_xy() {
        use std::cmp::Ordering;
        let a = Point2D::new(1.0, 5.0);
        let b = Point2D::new(1.0, 6.0);
        let c = Point2D::new(0.5, 9.0);
        assert_eq!(a.total_cmp_xy(&b), Ordering::Less);
        assert_eq!(a.total_cmp_xy(&c), Ordering::Greater);
    }
}
