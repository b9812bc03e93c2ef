//! Computational geometry for open-boundary derivation.
//!
//! - [`min_distance`]: divide-and-conquer closest pair, used to detect the
//!   native spacing of scattered datasets
//! - [`BoundaryPolygon`]: simplified convex hull with arc-length sampling
//! - [`convex_hull`]: counter-clockwise hull of a point cloud

mod closest_pair;
mod error;
mod hull;

pub use closest_pair::{min_distance, min_distance_xy};
pub use error::GeometryError;
pub use hull::{BoundaryPolygon, MAX_BOUNDARY_POINTS, convex_hull};
