//! Geometry of a target grid: bounding box, boundary polygon and evenly
//! spaced boundary points.
//!
//! No connectivity is needed. The boundary is the convex hull of the
//! finite nodes, which is what open-boundary forcing requires and which
//! works for structured and scattered grids alike.
//!
//! # Example
//!
//! ```
//! use nest_rs::mesh::{GridGeometry, RegularGridSpec};
//!
//! let spec = RegularGridSpec::new(0.0, 0.0, 0.0, 1.0, 1.0, 4, 4).unwrap();
//! let geom = GridGeometry::from_regular(&spec);
//!
//! assert_eq!(geom.bounding_box(0.0).unwrap().as_tuple(), (0.0, 0.0, 3.0, 3.0));
//! assert_eq!(geom.points_along_boundary(1.5).unwrap().len(), 8);
//! ```

use tracing::debug;

use super::{PointSet, RegularGridSpec};
use crate::geometry::{BoundaryPolygon, GeometryError};
use crate::types::{BoundingBox, Point2D};

/// Default Douglas–Peucker tolerance for [`GridGeometry::boundary`].
pub const DEFAULT_BOUNDARY_TOLERANCE: f64 = 0.2;

/// Geometry wrapper around the nodes of a target grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridGeometry {
    /// Node coordinates
    nodes: PointSet,
    /// Native node spacing (dx, dy), known for regular grids
    resolution: Option<(f64, f64)>,
}

impl GridGeometry {
    /// Wrap an arbitrary node set.
    pub fn new(nodes: PointSet) -> Self {
        Self {
            nodes,
            resolution: None,
        }
    }

    /// Build the nodes of a regular grid and remember its spacing.
    pub fn from_regular(spec: &RegularGridSpec) -> Self {
        Self {
            nodes: spec.build(),
            resolution: Some((spec.dx, spec.dy)),
        }
    }

    /// Override the native node spacing.
    pub fn with_resolution(mut self, dx: f64, dy: f64) -> Self {
        self.resolution = Some((dx, dy));
        self
    }

    /// Node coordinates.
    #[inline]
    pub fn nodes(&self) -> &PointSet {
        &self.nodes
    }

    /// Native node spacing (dx, dy), if known.
    #[inline]
    pub fn resolution(&self) -> Option<(f64, f64)> {
        self.resolution
    }

    /// Bounding box of the finite nodes, expanded by `buffer` on every side.
    ///
    /// # Errors
    ///
    /// [`GeometryError::EmptyGeometry`] if no node is finite.
    pub fn bounding_box(&self, buffer: f64) -> Result<BoundingBox, GeometryError> {
        let points = self.nodes.points();
        let bbox = BoundingBox::from_points(points.iter()).ok_or(GeometryError::EmptyGeometry)?;
        Ok(bbox.buffered(buffer))
    }

    /// Convex-hull boundary simplified within `tolerance` (0 = exact hull).
    ///
    /// # Errors
    ///
    /// [`GeometryError::EmptyGeometry`] if no node is finite,
    /// [`GeometryError::InvalidTolerance`] for a negative tolerance.
    pub fn boundary(&self, tolerance: f64) -> Result<BoundaryPolygon, GeometryError> {
        let polygon = BoundaryPolygon::from_points(&self.nodes.points(), tolerance)?;
        debug!(
            n_nodes = self.nodes.len(),
            n_vertices = polygon.n_vertices(),
            tolerance,
            "computed grid boundary"
        );
        Ok(polygon)
    }

    /// Boundary vertex coordinates as parallel arrays.
    ///
    /// The ring is closed: the first vertex is repeated at the end.
    pub fn boundary_points(&self, tolerance: f64) -> Result<(Vec<f64>, Vec<f64>), GeometryError> {
        Ok(self.boundary(tolerance)?.coords_xy())
    }

    /// Points every `spacing` arc-length units along the exact hull.
    ///
    /// Returns `ceil(perimeter / spacing)` points starting at the first hull
    /// vertex.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::EmptyGeometry`] if no node is finite
    /// - [`GeometryError::InvalidSpacing`] if `spacing` is not positive
    /// - [`GeometryError::SpacingExceedsPerimeter`] if `spacing > perimeter`
    /// - [`GeometryError::TooManyBoundaryPoints`] if `spacing` is too small for the perimeter
    pub fn points_along_boundary(&self, spacing: f64) -> Result<Vec<Point2D>, GeometryError> {
        self.boundary(0.0)?.points_along(spacing)
    }

    /// Smallest non-zero step between consecutive hull vertices, per axis.
    ///
    /// Stands in for the native spacing of grids given as raw nodes. Axes
    /// with no non-zero step report `None`.
    pub fn hull_steps(&self) -> Result<(Option<f64>, Option<f64>), GeometryError> {
        let ring = self.boundary(0.0)?.closed_ring();
        let min_step = |coord: fn(&Point2D) -> f64| {
            ring.windows(2)
                .map(|w| (coord(&w[1]) - coord(&w[0])).abs())
                .filter(|&d| d > 0.0)
                .min_by(f64::total_cmp)
        };
        Ok((min_step(|p| p.x), min_step(|p| p.y)))
    }

    /// Native spacing if known, otherwise the hull-vertex steps.
    ///
    /// Returns the smaller of the two axis spacings, or `None` for a grid
    /// that collapses to a single point.
    pub fn characteristic_spacing(&self) -> Result<Option<f64>, GeometryError> {
        if let Some((dx, dy)) = self.resolution {
            return Ok(Some(dx.min(dy)));
        }
        Ok(match self.hull_steps()? {
            (Some(dx), Some(dy)) => Some(dx.min(dy)),
            (Some(d), None) | (None, Some(d)) => Some(d),
            (None, None) => None,
        })
    }
}

impl From<PointSet> for GridGeometry {
    fn from(nodes: PointSet) -> Self {
        Self::new(nodes)
    }
}
