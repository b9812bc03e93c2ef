//! Boundary resolution and sampling errors.

use crate::geometry::GeometryError;
use thiserror::Error;

/// Fatal conditions raised while deriving or sampling boundary points.
///
/// None of these are retried: inputs are deterministic, so a retry would
/// reproduce the same failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundaryError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Nearest-neighbour selection found no source site within tolerance
    #[error(
        "No source site within tolerance {tolerance} of boundary site {site} at ({x}, {y})"
    )]
    InsufficientNeighbors {
        site: usize,
        x: f64,
        y: f64,
        tolerance: f64,
    },

    /// Source or resampled data variable has zero size
    #[error("Empty dataset for variable '{variable}': {reason}")]
    EmptyResampledDataset { variable: String, reason: String },

    /// Spacing could not be derived from the source dataset
    #[error("Cannot resolve boundary spacing: {0}")]
    UnresolvedSpacing(String),

    /// Selection tolerance is negative or not finite
    #[error("Invalid selection tolerance {0}, must be finite and >= 0")]
    InvalidTolerance(f64),

    /// Sampler configuration is unusable
    #[error("Invalid sampler configuration: {0}")]
    InvalidConfig(String),
}

/// Non-fatal: too few boundary points for a well-resolved boundary.
///
/// Returned alongside the boundary samples and logged with `tracing::warn!`.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error(
    "There are only {n_points} boundary points (less than 1 point per grid side), \
     consider setting a smaller spacing (the current spacing is {spacing})"
)]
pub struct LowResolutionWarning {
    pub n_points: usize,
    pub spacing: f64,
}

/// Minimum boundary point count below which [`LowResolutionWarning`] is raised.
pub const MIN_BOUNDARY_POINTS: usize = 4;
