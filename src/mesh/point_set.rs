//! Grid node collections.

use crate::geometry::GeometryError;
use crate::types::Point2D;

/// How the nodes of a [`PointSet`] are arranged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeLayout {
    /// Dense 2D array of nodes, stored row-major with shape `(ny, nx)`
    Structured { ny: usize, nx: usize },
    /// Unordered collection of nodes (stations, unstructured mesh vertices)
    Scattered,
}

/// Node coordinates of a target grid.
///
/// Coordinates are kept as two parallel arrays so structured grids can be
/// handed over from array-based readers without reshaping. NaN entries
/// (masked nodes) are allowed; geometric operations skip them.
///
/// # Example
///
/// ```
/// use nest_rs::mesh::PointSet;
///
/// // 2 × 3 structured grid
/// let x = vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0];
/// let y = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
/// let nodes = PointSet::structured(x, y, 2, 3).unwrap();
/// assert_eq!(nodes.shape(), Some((2, 3)));
/// assert_eq!(nodes.node(1, 2).unwrap().x, 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSet {
    x: Vec<f64>,
    y: Vec<f64>,
    layout: NodeLayout,
}

impl PointSet {
    /// Create a structured point set from row-major `(ny, nx)` arrays.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ShapeMismatch`] if either array does not
    /// hold exactly `ny * nx` values.
    pub fn structured(
        x: Vec<f64>,
        y: Vec<f64>,
        ny: usize,
        nx: usize,
    ) -> Result<Self, GeometryError> {
        let n = ny * nx;
        if x.len() != n || y.len() != n {
            return Err(GeometryError::ShapeMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self {
            x,
            y,
            layout: NodeLayout::Structured { ny, nx },
        })
    }

    /// Create a scattered point set from parallel coordinate arrays.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ShapeMismatch`] if the arrays differ in length.
    pub fn scattered(x: Vec<f64>, y: Vec<f64>) -> Result<Self, GeometryError> {
        if x.len() != y.len() {
            return Err(GeometryError::ShapeMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self {
            x,
            y,
            layout: NodeLayout::Scattered,
        })
    }

    /// Create a scattered point set from points.
    pub fn from_points(points: &[Point2D]) -> Self {
        let (x, y) = points.iter().map(|p| (p.x, p.y)).unzip();
        Self {
            x,
            y,
            layout: NodeLayout::Scattered,
        }
    }

    /// Node layout.
    #[inline]
    pub fn layout(&self) -> NodeLayout {
        self.layout
    }

    /// Shape `(ny, nx)` for structured sets.
    pub fn shape(&self) -> Option<(usize, usize)> {
        match self.layout {
            NodeLayout::Structured { ny, nx } => Some((ny, nx)),
            NodeLayout::Scattered => None,
        }
    }

    /// Number of nodes, including non-finite ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if there are no nodes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Flat x-coordinates.
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Flat y-coordinates.
    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Node at flat index `idx`.
    pub fn point(&self, idx: usize) -> Option<Point2D> {
        Some(Point2D::new(*self.x.get(idx)?, *self.y.get(idx)?))
    }

    /// Node at row `j`, column `i` of a structured set.
    pub fn node(&self, j: usize, i: usize) -> Option<Point2D> {
        match self.layout {
            NodeLayout::Structured { ny, nx } if j < ny && i < nx => self.point(j * nx + i),
            _ => None,
        }
    }

    /// Iterate over all nodes in storage order.
    pub fn iter(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| Point2D::new(x, y))
    }

    /// All nodes as points, in storage order.
    pub fn points(&self) -> Vec<Point2D> {
        self.iter().collect()
    }

    /// Nodes with both coordinates finite.
    pub fn finite_points(&self) -> Vec<Point2D> {
        self.iter().filter(Point2D::is_finite).collect()
    }
}
