//! Convex-hull boundary polygons.
//!
//! The open boundary of a nested model only needs the outer extent of the
//! domain, so the boundary is taken as the convex hull of the grid nodes.
//! This needs no mesh connectivity and works identically for structured
//! and scattered node sets.
//!
//! The hull comes from `geo::ConvexHull` and is normalized to a
//! counter-clockwise ring without collinear vertices, starting at the
//! smallest (x, y). It is optionally simplified with Douglas–Peucker
//! (`geo::Simplify`). Samples along the boundary are placed by walking the
//! closed ring at a fixed arc length.

use geo::{ConvexHull, Coord, EuclideanLength, LineString, MultiPoint, Simplify};

use super::GeometryError;
use crate::types::Point2D;

/// Upper limit on the number of points a boundary walk may produce.
pub const MAX_BOUNDARY_POINTS: usize = 10_000_000;

/// A closed boundary ring: the (optionally simplified) convex hull of a
/// point set.
///
/// Vertices are stored counter-clockwise, starting from the vertex with the
/// smallest x (then smallest y). The closing edge from the last vertex back
/// to the first is implicit.
///
/// Degenerate inputs are kept rather than rejected: collinear points give
/// a two-vertex ring whose perimeter runs out and back along the segment,
/// and a single distinct point gives a one-vertex ring of zero perimeter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryPolygon {
    vertices: Vec<Point2D>,
}

impl BoundaryPolygon {
    /// Convex hull of all finite points, simplified within `tolerance`.
    ///
    /// A tolerance of 0 returns the unsimplified hull.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::EmptyGeometry`] if no point is finite
    /// - [`GeometryError::InvalidTolerance`] if `tolerance` is negative or NaN
    pub fn from_points(points: &[Point2D], tolerance: f64) -> Result<Self, GeometryError> {
        if !(tolerance >= 0.0) || !tolerance.is_finite() {
            return Err(GeometryError::InvalidTolerance(tolerance));
        }

        let hull = convex_hull(points);
        if hull.is_empty() {
            return Err(GeometryError::EmptyGeometry);
        }

        let polygon = Self { vertices: hull };
        if tolerance > 0.0 && polygon.vertices.len() > 3 {
            Ok(polygon.simplified(tolerance))
        } else {
            Ok(polygon)
        }
    }

    /// Douglas–Peucker simplification of the ring.
    ///
    /// Falls back to the input ring if simplification would collapse it to
    /// fewer than three vertices.
    fn simplified(&self, tolerance: f64) -> Self {
        let simple = self.ring_line_string().simplify(&tolerance);

        // Closed ring: first coordinate repeated at the end
        let n_unique = simple.0.len().saturating_sub(1);
        if n_unique < 3 {
            return self.clone();
        }

        Self {
            vertices: simple.0[..n_unique].iter().map(|&c| Point2D::from(c)).collect(),
        }
    }

    /// Hull vertices without the closing repeat.
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Number of distinct vertices.
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices with the first vertex repeated at the end.
    pub fn closed_ring(&self) -> Vec<Point2D> {
        let mut ring = self.vertices.clone();
        if let Some(&first) = self.vertices.first() {
            ring.push(first);
        }
        ring
    }

    /// Ring as two parallel coordinate arrays (closed, first vertex repeated).
    pub fn coords_xy(&self) -> (Vec<f64>, Vec<f64>) {
        self.closed_ring().iter().map(|p| (p.x, p.y)).unzip()
    }

    fn ring_line_string(&self) -> LineString<f64> {
        self.closed_ring().into_iter().map(Coord::from).collect()
    }

    /// Lengths of each edge of the closed ring, in vertex order.
    fn edge_lengths(&self) -> Vec<f64> {
        let n = self.vertices.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n)
            .map(|i| self.vertices[i].distance(&self.vertices[(i + 1) % n]))
            .collect()
    }

    /// Total length of the closed ring.
    pub fn perimeter(&self) -> f64 {
        self.ring_line_string().euclidean_length()
    }

    /// Evenly spaced points along the ring, `spacing` arc-length units apart.
    ///
    /// The first point is the first vertex; the walk wraps around the closed
    /// ring and stops before returning to the start. Produces
    /// `ceil(perimeter / spacing)` points.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::InvalidSpacing`] if `spacing` is not positive and finite
    /// - [`GeometryError::SpacingExceedsPerimeter`] if `spacing > perimeter`
    /// - [`GeometryError::TooManyBoundaryPoints`] if the walk would produce more
    ///   than [`MAX_BOUNDARY_POINTS`] points
    pub fn points_along(&self, spacing: f64) -> Result<Vec<Point2D>, GeometryError> {
        if !(spacing > 0.0) || !spacing.is_finite() {
            return Err(GeometryError::InvalidSpacing(spacing));
        }

        let perimeter = self.perimeter();
        if perimeter < spacing {
            return Err(GeometryError::SpacingExceedsPerimeter { spacing, perimeter });
        }
        let intervals = (perimeter / spacing).ceil();
        if !intervals.is_finite() || intervals > MAX_BOUNDARY_POINTS as f64 {
            return Err(GeometryError::TooManyBoundaryPoints { spacing, perimeter });
        }

        let ring = self.closed_ring();
        let lengths = self.edge_lengths();
        let n_points = intervals as usize;
        let mut points = Vec::with_capacity(n_points);

        // Single forward pass: targets increase monotonically
        let mut edge = 0;
        let mut edge_start = 0.0;
        for k in 0..n_points {
            let target = k as f64 * spacing;
            while edge + 1 < lengths.len() && target > edge_start + lengths[edge] {
                edge_start += lengths[edge];
                edge += 1;
            }
            let len = lengths[edge];
            let t = if len > 0.0 {
                ((target - edge_start) / len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            points.push(ring[edge].lerp(&ring[edge + 1], t));
        }

        Ok(points)
    }
}

/// Counter-clockwise convex hull of the finite points.
///
/// Collinear points on hull edges are dropped. The result starts at the
/// lexicographically smallest point and does not repeat it at the end.
/// Fewer than three distinct points, or all points on one line, give the
/// distinct extreme points only. Empty if no point is finite.
pub fn convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    let mut pts: Vec<Point2D> = points.iter().copied().filter(Point2D::is_finite).collect();
    pts.sort_by(Point2D::total_cmp_xy);
    pts.dedup();

    let (first, last) = match pts.as_slice() {
        [] | [_] | [_, _] => return pts,
        [first, .., last] => (*first, *last),
    };
    // Sorted order puts the extremes of a collinear set at both ends
    if pts.iter().all(|p| cross(&first, &last, p) == 0.0) {
        return vec![first, last];
    }

    let cloud: MultiPoint<f64> = pts.iter().map(|&p| Coord::from(p)).collect();
    let mut ring: Vec<Point2D> = cloud
        .convex_hull()
        .exterior()
        .coords()
        .map(|&c| Point2D::from(c))
        .collect();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring.dedup();

    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    drop_collinear(&mut ring);

    let start = (0..ring.len())
        .min_by(|&a, &b| ring[a].total_cmp_xy(&ring[b]))
        .unwrap_or(0);
    ring.rotate_left(start);
    ring
}

/// Remove vertices lying on the edge between their neighbours.
fn drop_collinear(ring: &mut Vec<Point2D>) {
    let mut i = 0;
    while ring.len() > 3 && i < ring.len() {
        let n = ring.len();
        let prev = ring[(i + n - 1) % n];
        let next = ring[(i + 1) % n];
        if cross(&prev, &ring[i], &next) == 0.0 {
            ring.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Twice the signed area of an open ring; positive when counter-clockwise.
fn signed_area(ring: &[Point2D]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// z-component of (a - o) × (b - o); positive for a counter-clockwise turn.
#[inline]
fn cross(o: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}
