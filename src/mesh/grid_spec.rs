//! Target grid specification from loose configuration parameters.
//!
//! A target grid is given either by explicit node arrays or by the regular
//! grid parameters `x0, y0, dx, dy, nx, ny` (plus an optional rotation).
//! The two styles are mutually exclusive; mixing them is an error rather
//! than being silently resolved.

use thiserror::Error;

use super::{GridGeometry, PointSet, RegularGridSpec};
use crate::geometry::GeometryError;

/// Error type for grid specification.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridSpecError {
    /// Explicit nodes were given together with regular grid parameters
    #[error("x, y provided explicitly, can't process {0}")]
    ConflictingSpecification(String),

    /// Regular grid parameters are incomplete
    #[error("{0} must be provided for a regular grid")]
    MissingParameters(String),

    /// A parameter is out of range
    #[error("Invalid grid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Explicit node arrays are malformed
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A fully resolved target grid.
#[derive(Clone, Debug, PartialEq)]
pub enum GridSpec {
    /// Rotated regular grid
    Regular(RegularGridSpec),
    /// Explicit node coordinates
    Nodes(PointSet),
}

impl GridSpec {
    /// Derive the grid geometry.
    pub fn geometry(&self) -> GridGeometry {
        match self {
            GridSpec::Regular(spec) => GridGeometry::from_regular(spec),
            GridSpec::Nodes(nodes) => GridGeometry::new(nodes.clone()),
        }
    }
}

/// Loose grid parameters as they arrive from a configuration file.
///
/// Every field is optional; [`GridParameters::resolve`] checks that exactly
/// one specification style is complete.
///
/// # Example
///
/// ```
/// use nest_rs::mesh::{GridParameters, GridSpec};
///
/// let params = GridParameters {
///     x0: Some(110.0),
///     y0: Some(-35.0),
///     dx: Some(0.5),
///     dy: Some(0.5),
///     nx: Some(10),
///     ny: Some(8),
///     ..Default::default()
/// };
/// assert!(matches!(params.resolve(), Ok(GridSpec::Regular(_))));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridParameters {
    /// Explicit node x-coordinates (flat)
    pub x: Option<Vec<f64>>,
    /// Explicit node y-coordinates (flat)
    pub y: Option<Vec<f64>>,
    /// Shape `(ny, nx)` of explicit structured nodes; scattered if absent
    pub shape: Option<(usize, usize)>,
    pub x0: Option<f64>,
    pub y0: Option<f64>,
    /// Rotation in degrees; defaults to 0
    pub rot: Option<f64>,
    pub dx: Option<f64>,
    pub dy: Option<f64>,
    pub nx: Option<usize>,
    pub ny: Option<usize>,
}

impl GridParameters {
    /// Names of the regular-grid parameters that are set.
    fn regular_keys_set(&self) -> Vec<&'static str> {
        [
            ("x0", self.x0.is_some()),
            ("y0", self.y0.is_some()),
            ("dx", self.dx.is_some()),
            ("dy", self.dy.is_some()),
            ("nx", self.nx.is_some()),
            ("ny", self.ny.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    /// Resolve into a [`GridSpec`].
    ///
    /// # Errors
    ///
    /// - [`GridSpecError::ConflictingSpecification`] if `x`/`y` and any of
    ///   `x0, y0, dx, dy, nx, ny` are both given
    /// - [`GridSpecError::MissingParameters`] if neither style is complete
    /// - [`GridSpecError::InvalidParameter`] or [`GridSpecError::Geometry`]
    ///   for out-of-range values or mismatched arrays
    pub fn resolve(&self) -> Result<GridSpec, GridSpecError> {
        if self.x.is_some() || self.y.is_some() {
            let set = self.regular_keys_set();
            if !set.is_empty() {
                return Err(GridSpecError::ConflictingSpecification(set.join(",")));
            }
            let (Some(x), Some(y)) = (&self.x, &self.y) else {
                return Err(GridSpecError::MissingParameters("x,y".to_string()));
            };
            let nodes = match self.shape {
                Some((ny, nx)) => PointSet::structured(x.clone(), y.clone(), ny, nx)?,
                None => PointSet::scattered(x.clone(), y.clone())?,
            };
            return Ok(GridSpec::Nodes(nodes));
        }

        match (self.x0, self.y0, self.dx, self.dy, self.nx, self.ny) {
            (Some(x0), Some(y0), Some(dx), Some(dy), Some(nx), Some(ny)) => {
                let rot = self.rot.unwrap_or(0.0);
                Ok(GridSpec::Regular(RegularGridSpec::new(
                    x0, y0, rot, dx, dy, nx, ny,
                )?))
            }
            _ => Err(GridSpecError::MissingParameters(
                "x0,y0,dx,dy,nx,ny".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular() -> GridParameters {
        GridParameters {
            x0: Some(0.0),
            y0: Some(0.0),
            dx: Some(1.0),
            dy: Some(1.0),
            nx: Some(4),
            ny: Some(4),
            ..Default::default()
        }
    }

    #[test]
    fn test_regular_resolves() {
        let spec = regular().resolve().unwrap();
        let GridSpec::Regular(r) = spec else {
            panic!("expected regular grid");
        };
        assert_eq!(r.rotation_deg, 0.0);
        assert_eq!(r.nx, 4);
    }

    #[test]
    fn test_rotation_passed_through() {
        let params = GridParameters {
            rot: Some(30.0),
            ..regular()
        };
        let GridSpec::Regular(r) = params.resolve().unwrap() else {
            panic!("expected regular grid");
        };
        assert_eq!(r.rotation_deg, 30.0);
    }

    #[test]
    fn test_explicit_nodes_resolve() {
        let params = GridParameters {
            x: Some(vec![0.0, 1.0, 0.5]),
            y: Some(vec![0.0, 0.0, 1.0]),
            ..Default::default()
        };
        let GridSpec::Nodes(nodes) = params.resolve().unwrap() else {
            panic!("expected explicit nodes");
        };
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.shape(), None);
    }

    #[test]
    fn test_explicit_structured_nodes() {
        let params = GridParameters {
            x: Some(vec![0.0, 1.0, 0.0, 1.0]),
            y: Some(vec![0.0, 0.0, 1.0, 1.0]),
            shape: Some((2, 2)),
            ..Default::default()
        };
        let GridSpec::Nodes(nodes) = params.resolve().unwrap() else {
            panic!("expected explicit nodes");
        };
        assert_eq!(nodes.shape(), Some((2, 2)));
    }

    #[test]
    fn test_conflict_is_error() {
        let params = GridParameters {
            x: Some(vec![0.0]),
            y: Some(vec![0.0]),
            dx: Some(1.0),
            nx: Some(3),
            ..Default::default()
        };
        assert_eq!(
            params.resolve(),
            Err(GridSpecError::ConflictingSpecification("dx,nx".to_string()))
        );
    }

    #[test]
    fn test_missing_parameters() {
        let params = GridParameters {
            ny: None,
            ..regular()
        };
        assert!(matches!(
            params.resolve(),
            Err(GridSpecError::MissingParameters(_))
        ));
        let params = GridParameters {
            x: Some(vec![0.0]),
            ..Default::default()
        };
        assert_eq!(
            params.resolve(),
            Err(GridSpecError::MissingParameters("x,y".to_string()))
        );
    }

    #[test]
    fn test_mismatched_explicit_arrays() {
        let params = GridParameters {
            x: Some(vec![0.0, 1.0]),
            y: Some(vec![0.0]),
            ..Default::default()
        };
        assert!(matches!(params.resolve(), Err(GridSpecError::Geometry(_))));
    }

    #[test]
    fn test_geometry_from_spec() {
        let geom = regular().resolve().unwrap().geometry();
        assert_eq!(geom.resolution(), Some((1.0, 1.0)));
        assert_eq!(geom.nodes().len(), 16);
    }
}
