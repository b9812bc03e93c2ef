//! Boundary spacing resolution.
//!
//! Decides how far apart the boundary sample points are and walks the
//! target grid's hull at that spacing. Every policy is handled by
//! [`BoundaryResolver::resolve_spacing`], which dispatches on the
//! [`SpacingPolicy`] and on the source dataset's [`SourceKind`].
//!
//! | Policy | Spacing |
//! |--------|---------|
//! | `Explicit(d)` | `d` |
//! | `InheritFromSource`, `Automatic` | native spacing of the source |
//! | `Aligned` | native spacing rounded so each side of the target bbox divides evenly |
//!
//! Native source spacing:
//! - structured: smallest adjacent difference of the sorted `x` and `y` axes
//! - scattered: closest pair among the sites within the target bbox
//!   buffered by `2 * min(dx, dy)` of the target grid

use tracing::{debug, warn};

use super::{BoundaryError, LowResolutionWarning, MIN_BOUNDARY_POINTS};
use crate::dataset::{SourceDataset, SourceKind};
use crate::geometry::{GeometryError, min_distance};
use crate::mesh::GridGeometry;
use crate::types::Point2D;

/// Minimum number of intervals per side for [`SpacingPolicy::Aligned`].
pub const MIN_ALIGNED_INTERVALS: f64 = 3.0;

/// How the boundary sample spacing is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpacingPolicy {
    /// Fixed spacing in grid coordinate units
    Explicit(f64),
    /// Native spacing of the parent (source) dataset
    InheritFromSource,
    /// Native spacing of the source, detected around the target grid
    #[default]
    Automatic,
    /// Source spacing adjusted to divide the target extent evenly, with at
    /// least three intervals per side
    Aligned,
}

/// Ordered boundary sample points and the spacing they were derived with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundarySamples {
    pub points: Vec<Point2D>,
    pub spacing: f64,
    /// Set when fewer than [`MIN_BOUNDARY_POINTS`] points were produced
    pub warning: Option<LowResolutionWarning>,
}

impl BoundarySamples {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coordinates as parallel arrays.
    pub fn xy(&self) -> (Vec<f64>, Vec<f64>) {
        self.points.iter().map(|p| (p.x, p.y)).unzip()
    }
}

/// Derives boundary sample points for a target grid.
///
/// # Example
///
/// ```
/// use nest_rs::boundary::{BoundaryResolver, SpacingPolicy};
/// use nest_rs::dataset::GriddedDataset;
/// use nest_rs::mesh::{GridGeometry, RegularGridSpec};
///
/// let spec = RegularGridSpec::new(0.0, 0.0, 0.0, 1.0, 1.0, 4, 4).unwrap();
/// let grid = GridGeometry::from_regular(&spec);
/// let axis = vec![0.0, 1.5, 3.0];
/// let source = GriddedDataset::new("hs", axis.clone(), axis, 1, vec![0.0; 9]).unwrap();
///
/// let samples = BoundaryResolver::new(SpacingPolicy::InheritFromSource)
///     .resolve(&grid, &source)
///     .unwrap();
/// assert_eq!(samples.spacing, 1.5);
/// assert_eq!(samples.len(), 8);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundaryResolver {
    policy: SpacingPolicy,
}

impl BoundaryResolver {
    pub fn new(policy: SpacingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SpacingPolicy {
        self.policy
    }

    /// Resolve the spacing and walk the grid boundary at it.
    ///
    /// Fewer than [`MIN_BOUNDARY_POINTS`] points is not an error: a
    /// [`LowResolutionWarning`] is logged and returned with the samples.
    pub fn resolve<S>(
        &self,
        grid: &GridGeometry,
        source: &S,
    ) -> Result<BoundarySamples, BoundaryError>
    where
        S: SourceDataset + ?Sized,
    {
        let spacing = self.resolve_spacing(grid, source)?;
        let points = grid.points_along_boundary(spacing)?;
        let warning = (points.len() < MIN_BOUNDARY_POINTS).then(|| {
            let w = LowResolutionWarning {
                n_points: points.len(),
                spacing,
            };
            warn!("{w}");
            w
        });
        debug!(n_points = points.len(), spacing, "boundary points resolved");
        Ok(BoundarySamples {
            points,
            spacing,
            warning,
        })
    }

    /// Numeric spacing for this resolver's policy.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::InvalidSpacing`] for a non-positive explicit spacing
    /// - [`BoundaryError::UnresolvedSpacing`] if the source has no two
    ///   distinct sites to measure
    pub fn resolve_spacing<S>(
        &self,
        grid: &GridGeometry,
        source: &S,
    ) -> Result<f64, BoundaryError>
    where
        S: SourceDataset + ?Sized,
    {
        let spacing = match self.policy {
            SpacingPolicy::Explicit(d) => {
                if !(d > 0.0 && d.is_finite()) {
                    return Err(GeometryError::InvalidSpacing(d).into());
                }
                d
            }
            SpacingPolicy::InheritFromSource | SpacingPolicy::Automatic => {
                source_spacing(grid, source)?
            }
            SpacingPolicy::Aligned => {
                let native = source_spacing(grid, source)?;
                let bbox = grid.bounding_box(0.0)?;
                let aligned = |len: f64| {
                    let n = (len / native).floor().max(MIN_ALIGNED_INTERVALS);
                    len / n
                };
                [bbox.width(), bbox.height()]
                    .into_iter()
                    .filter(|&len| len > 0.0)
                    .map(aligned)
                    .min_by(f64::total_cmp)
                    .ok_or_else(|| {
                        BoundaryError::UnresolvedSpacing("target grid has zero extent".into())
                    })?
            }
        };
        debug!(policy = ?self.policy, spacing, "boundary spacing resolved");
        Ok(spacing)
    }
}

/// Native spacing of `source` around `grid`.
fn source_spacing<S>(grid: &GridGeometry, source: &S) -> Result<f64, BoundaryError>
where
    S: SourceDataset + ?Sized,
{
    match source.kind() {
        SourceKind::Structured => {
            [axis_spacing(source.x_coords()), axis_spacing(source.y_coords())]
                .into_iter()
                .flatten()
                .min_by(f64::total_cmp)
                .ok_or_else(|| {
                    BoundaryError::UnresolvedSpacing(
                        "source axes have fewer than two distinct coordinates".into(),
                    )
                })
        }
        SourceKind::Scattered => {
            let step = grid.characteristic_spacing()?.ok_or_else(|| {
                BoundaryError::UnresolvedSpacing("target grid has no resolvable resolution".into())
            })?;
            let bbox = grid.bounding_box(2.0 * step)?;
            let cropped = source.crop(&bbox);
            let d = min_distance(&cropped.points());
            debug!(
                n_sites = cropped.n_sites(),
                buffer = 2.0 * step,
                min_distance = d,
                "measured source site spacing"
            );
            if d == 0.0 {
                Err(BoundaryError::UnresolvedSpacing(format!(
                    "duplicate source sites within {bbox} give a zero spacing"
                )))
            } else if !d.is_finite() {
                Err(BoundaryError::UnresolvedSpacing(format!(
                    "fewer than two source sites within {bbox}"
                )))
            } else {
                Ok(d)
            }
        }
    }
}

/// Smallest positive difference between adjacent sorted axis values.
fn axis_spacing(axis: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = axis.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&d| d > 0.0)
        .min_by(f64::total_cmp)
}
