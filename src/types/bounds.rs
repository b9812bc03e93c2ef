//! Axis-aligned bounding boxes.

use std::fmt;

use super::Point2D;

/// Axis-aligned bounding box `(min_x, min_y, max_x, max_y)`.
///
/// Unlike a model domain, a bounding box may be degenerate: a single point
/// or a line of points has zero width or height.
///
/// # Example
///
/// ```
/// use nest_rs::types::{BoundingBox, Point2D};
///
/// let points = [Point2D::new(0.0, 0.0), Point2D::new(3.0, 2.0)];
/// let bbox = BoundingBox::from_points(points.iter()).unwrap();
/// assert_eq!(bbox.as_tuple(), (0.0, 0.0, 3.0, 2.0));
///
/// let buffered = bbox.buffered(1.0);
/// assert_eq!(buffered.as_tuple(), (-1.0, -1.0, 4.0, 3.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Minimum x-coordinate (western edge)
    pub min_x: f64,
    /// Minimum y-coordinate (southern edge)
    pub min_y: f64,
    /// Maximum x-coordinate (eastern edge)
    pub max_x: f64,
    /// Maximum y-coordinate (northern edge)
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a bounding box from its corners.
    ///
    /// # Panics
    ///
    /// Panics if `max_x < min_x` or `max_y < min_y`.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        assert!(
            max_x >= min_x,
            "max_x ({}) must not be less than min_x ({})",
            max_x,
            min_x
        );
        assert!(
            max_y >= min_y,
            "max_y ({}) must not be less than min_y ({})",
            max_y,
            min_y
        );

        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing every finite point.
    ///
    /// Points with a NaN or infinite coordinate are skipped. Returns `None`
    /// when no finite point remains.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        let mut bbox: Option<Self> = None;
        for p in points.into_iter().filter(|p| p.is_finite()) {
            bbox = Some(match bbox {
                None => Self {
                    min_x: p.x,
                    min_y: p.y,
                    max_x: p.x,
                    max_y: p.y,
                },
                Some(b) => Self {
                    min_x: b.min_x.min(p.x),
                    min_y: b.min_y.min(p.y),
                    max_x: b.max_x.max(p.x),
                    max_y: b.max_y.max(p.y),
                },
            });
        }
        bbox
    }

    /// Expand symmetrically by `buffer` on every side.
    ///
    /// A negative buffer shrinks the box; shrinking past a degenerate box
    /// collapses it onto its center.
    pub fn buffered(&self, buffer: f64) -> Self {
        let (cx, cy) = self.center();
        let min_x = self.min_x - buffer;
        let max_x = self.max_x + buffer;
        let min_y = self.min_y - buffer;
        let max_y = self.max_y + buffer;
        Self {
            min_x: if min_x <= max_x { min_x } else { cx },
            max_x: if min_x <= max_x { max_x } else { cx },
            min_y: if min_y <= max_y { min_y } else { cy },
            max_y: if min_y <= max_y { max_y } else { cy },
        }
    }

    /// Box width (max_x - min_x).
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Box height (max_y - min_y).
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Box center.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check if a point is inside the box (inclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Check if a point is inside the box (inclusive).
    #[inline]
    pub fn contains_point(&self, p: &Point2D) -> bool {
        self.contains(p.x, p.y)
    }

    /// Return as tuple (min_x, min_y, max_x, max_y).
    #[inline]
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.4}, {:.4}] × [{:.4}, {:.4}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}
