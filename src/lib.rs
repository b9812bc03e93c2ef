//! # nest-rs
//!
//! Open-boundary forcing for nested ocean-wave and circulation model runs.
//!
//! Given the grid of a nested (child) model and a parent dataset, this crate
//! works out where along the child grid's boundary forcing is needed and
//! resamples the parent data onto those points:
//! - Target grids: rotated regular grids or raw node sets
//! - Convex-hull boundary with Douglas–Peucker simplification
//! - Evenly spaced boundary points by arc length
//! - Source spacing detection (adjacent axis differences or closest pair)
//! - Nearest-neighbour and inverse-distance resampling with an R-tree
//!
//! File formats, dataset catalogs and solver namelists are left to the
//! caller: datasets enter through the [`dataset::SourceDataset`] trait and
//! leave as an in-memory [`dataset::ResampledDataset`].
//!
//! # Example
//!
//! ```
//! use nest_rs::{GridGeometry, NestingBoundary, RegularGridSpec, SamplerConfig, StationDataset};
//!
//! let spec = RegularGridSpec::new(0.0, 0.0, 30.0, 0.1, 0.1, 21, 11).unwrap();
//! let grid = GridGeometry::from_regular(&spec);
//!
//! // Parent stations on a 0.25 lattice around the child grid
//! let (mut x, mut y) = (Vec::new(), Vec::new());
//! for j in -8..=16 {
//!     for i in -8..=16 {
//!         x.push(i as f64 * 0.25);
//!         y.push(j as f64 * 0.25);
//!     }
//! }
//! let values = x.iter().map(|v| v * 10.0).collect();
//! let parent = StationDataset::new("hs", x, y, 1, values).unwrap();
//!
//! let nested = NestingBoundary::new("child")
//!     .with_sampler(SamplerConfig::idw(Some(0.5)))
//!     .build(&grid, &parent)
//!     .unwrap();
//!
//! assert_eq!(nested.samples.spacing, 0.25);
//! assert_eq!(nested.data.n_missing(), 0);
//! ```

pub mod boundary;
pub mod dataset;
pub mod geometry;
pub mod mesh;
pub mod types;

// Re-export main types for convenience
pub use boundary::{
    BoundaryError, BoundaryResolver, BoundarySampler, BoundarySamples, LowResolutionWarning,
    NestedBoundaryData, NestingBoundary, SamplerConfig, SelectionMethod, SpacingPolicy,
};
pub use dataset::{
    DatasetError, GriddedDataset, ResampledDataset, SourceDataset, SourceKind, StationDataset,
};
pub use geometry::{BoundaryPolygon, GeometryError, min_distance};
pub use mesh::{GridGeometry, GridParameters, GridSpec, GridSpecError, PointSet, RegularGridSpec};
pub use types::{BoundingBox, Point2D};
