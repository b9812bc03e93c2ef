//! Open-boundary point derivation and resampling for nested runs.
//!
//! A nested (child) model is forced at its open boundary by data from a
//! parent model. This module decides where along the child grid's boundary
//! that data is needed and resamples the parent onto those points.
//!
//! # Components
//!
//! | Type | Role |
//! |------|------|
//! | [`SpacingPolicy`] | How far apart boundary points are |
//! | [`BoundaryResolver`] | Resolves the spacing and walks the grid hull |
//! | [`BoundarySampler`] | Nearest / inverse-distance selection from the source |
//! | [`NestingBoundary`] | The whole pipeline, configured with `with_*` methods |
//!
//! # Failure policy
//!
//! - Nearest selection with no source site in tolerance is fatal
//!   ([`BoundaryError::InsufficientNeighbors`]).
//! - Inverse-distance selection with fewer than two neighbours marks the
//!   site missing and logs a warning.
//! - Fewer than [`MIN_BOUNDARY_POINTS`] boundary points logs and returns a
//!   [`LowResolutionWarning`] but continues.
//! - An empty source or result is fatal
//!   ([`BoundaryError::EmptyResampledDataset`]).

mod error;
mod index;
mod nesting;
mod resolver;
mod sampler;

pub use error::{BoundaryError, LowResolutionWarning, MIN_BOUNDARY_POINTS};
pub use nesting::{NestedBoundaryData, NestingBoundary};
pub use resolver::{BoundaryResolver, BoundarySamples, MIN_ALIGNED_INTERVALS, SpacingPolicy};
pub use sampler::{BoundarySampler, SamplerConfig, SelectionMethod};
