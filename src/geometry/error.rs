//! Geometry error type.

use thiserror::Error;

/// Error type for boundary geometry operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The point set has no finite point
    #[error("Point set has no finite points")]
    EmptyGeometry,

    /// Not even one interval of `spacing` fits on the boundary
    #[error("Spacing = {spacing} > grid perimeter = {perimeter}")]
    SpacingExceedsPerimeter { spacing: f64, perimeter: f64 },

    /// The walk would need more than the allowed number of boundary points
    #[error(
        "Spacing = {spacing} gives more than {limit} points on a perimeter of {perimeter}",
        limit = super::MAX_BOUNDARY_POINTS
    )]
    TooManyBoundaryPoints { spacing: f64, perimeter: f64 },

    /// Spacing must be positive and finite
    #[error("Invalid boundary spacing: {0} (must be positive and finite)")]
    InvalidSpacing(f64),

    /// Simplification tolerance must be non-negative and finite
    #[error("Invalid simplification tolerance: {0} (must be >= 0)")]
    InvalidTolerance(f64),

    /// Coordinate arrays disagree in length or shape
    #[error("Coordinate shape mismatch: x has {x_len} values, y has {y_len}")]
    ShapeMismatch { x_len: usize, y_len: usize },
}
