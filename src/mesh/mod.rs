//! Target grid representation.
//!
//! Provides the node-level view of the grid a nested model runs on:
//! - [`PointSet`]: structured or scattered node coordinates
//! - [`RegularGridSpec`]: rotated regular grid, built into a `PointSet`
//! - [`GridParameters`] / [`GridSpec`]: validation of the two mutually
//!   exclusive ways of specifying a grid
//! - [`GridGeometry`]: bounding box, convex-hull boundary and boundary points

mod grid_geometry;
mod grid_spec;
mod point_set;
mod regular_grid;

pub use grid_geometry::{DEFAULT_BOUNDARY_TOLERANCE, GridGeometry};
pub use grid_spec::{GridParameters, GridSpec, GridSpecError};
pub use point_set::{NodeLayout, PointSet};
pub use regular_grid::RegularGridSpec;
