//! One-way nesting boundary: from a target grid and a parent dataset to the
//! forcing data at the grid's open-boundary points.
//!
//! The pipeline is
//!
//! 1. resolve the boundary spacing ([`BoundaryResolver`])
//! 2. walk the grid hull at that spacing
//! 3. optionally crop the source to the grid bbox plus a buffer
//! 4. resample the source onto the boundary points ([`BoundarySampler`])
//!
//! Every step is a pure function of its inputs, so repeated builds with the
//! same inputs give bit-identical results.
//!
//! # Example
//!
//! ```
//! use nest_rs::boundary::{NestingBoundary, SamplerConfig, SpacingPolicy};
//! use nest_rs::dataset::StationDataset;
//! use nest_rs::mesh::{GridGeometry, RegularGridSpec};
//!
//! let spec = RegularGridSpec::new(0.0, 0.0, 0.0, 1.0, 1.0, 4, 4).unwrap();
//! let grid = GridGeometry::from_regular(&spec);
//! let parent = StationDataset::new(
//!     "efth",
//!     vec![-1.0, 4.0, 4.0, -1.0],
//!     vec![-1.0, -1.0, 4.0, 4.0],
//!     1,
//!     vec![1.0, 2.0, 3.0, 4.0],
//! )
//! .unwrap();
//!
//! let boundary = NestingBoundary::new("swan_bnd")
//!     .with_spacing(SpacingPolicy::Explicit(1.5))
//!     .with_sampler(SamplerConfig::nearest(None));
//! let nested = boundary.build(&grid, &parent).unwrap();
//!
//! assert_eq!(nested.samples.len(), 8);
//! assert_eq!(nested.data.record(0), &[1.0]);
//! ```

use tracing::{debug, info};

use super::{
    BoundaryError, BoundaryResolver, BoundarySampler, BoundarySamples, SamplerConfig,
    SpacingPolicy,
};
use crate::dataset::{ResampledDataset, SourceDataset, StationDataset};
use crate::mesh::GridGeometry;

/// Open-boundary forcing definition for a nested run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NestingBoundary {
    /// Identifier of the boundary data (used by writers for file naming)
    pub id: String,
    /// How boundary sample spacing is chosen
    pub spacing: SpacingPolicy,
    /// How source data is selected at each sample point
    pub sampler: SamplerConfig,
    /// Crop the source to the grid bbox before sampling
    pub crop_source: bool,
}

/// Boundary points and the source data resampled onto them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NestedBoundaryData {
    pub samples: BoundarySamples,
    pub data: ResampledDataset,
}

impl NestingBoundary {
    /// Automatic spacing, default sampler, cropping enabled.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            spacing: SpacingPolicy::default(),
            sampler: SamplerConfig::default(),
            crop_source: true,
        }
    }

    pub fn with_spacing(mut self, spacing: SpacingPolicy) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_crop_source(mut self, crop: bool) -> Self {
        self.crop_source = crop;
        self
    }

    /// Boundary points only, without sampling.
    pub fn boundary_samples<S>(
        &self,
        grid: &GridGeometry,
        source: &S,
    ) -> Result<BoundarySamples, BoundaryError>
    where
        S: SourceDataset + ?Sized,
    {
        BoundaryResolver::new(self.spacing).resolve(grid, source)
    }

    /// Source sites the sampler will see.
    ///
    /// With `crop_source` and a bounded tolerance, the sites inside the grid
    /// bbox buffered by the larger of twice the grid spacing and the
    /// tolerance. Sites outside that box are beyond tolerance of every
    /// boundary point.
    pub fn source_sites<S>(
        &self,
        grid: &GridGeometry,
        source: &S,
    ) -> Result<StationDataset, BoundaryError>
    where
        S: SourceDataset + ?Sized,
    {
        let Some(tolerance) = self.sampler.tolerance.filter(|_| self.crop_source) else {
            return Ok(source.sites());
        };
        let step = grid.characteristic_spacing()?.unwrap_or(0.0);
        let buffer = (2.0 * step).max(tolerance);
        let cropped = source.crop(&grid.bounding_box(buffer)?);
        debug!(
            id = %self.id,
            buffer,
            n_sites = cropped.n_sites(),
            "cropped source to grid"
        );
        Ok(cropped)
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    ///
    /// Any error from spacing resolution, boundary walking or sampling; see
    /// [`BoundaryError`].
    pub fn build<S>(
        &self,
        grid: &GridGeometry,
        source: &S,
    ) -> Result<NestedBoundaryData, BoundaryError>
    where
        S: SourceDataset + ?Sized,
    {
        let sampler = BoundarySampler::new(self.sampler)?;
        let samples = self.boundary_samples(grid, source)?;
        let sites = self.source_sites(grid, source)?;
        let data = sampler.sample(&samples.points, &sites)?;
        info!(
            id = %self.id,
            n_points = samples.len(),
            spacing = samples.spacing,
            n_missing = data.n_missing(),
            "built nesting boundary"
        );
        Ok(NestedBoundaryData { samples, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::RegularGridSpec;
    use crate::types::Point2D;

    fn grid() -> GridGeometry {
        GridGeometry::from_regular(&RegularGridSpec::new(0.0, 0.0, 0.0, 1.0, 1.0, 4, 4).unwrap())
    }

    fn ring_stations() -> StationDataset {
        // Stations every 0.5 along the boundary of [-0.5, 3.5]^2, plus a far one
        let mut x = Vec::new();
        let mut y = Vec::new();
        for k in 0..8 {
            let s = -0.5 + 0.5 * k as f64;
            x.extend([s, 3.5, 3.5 - 0.5 * k as f64, -0.5]);
            y.extend([-0.5, s, 3.5, 3.5 - 0.5 * k as f64]);
        }
        x.push(100.0);
        y.push(100.0);
        let values = (0..x.len()).map(|i| i as f64).collect();
        StationDataset::new("efth", x, y, 1, values).unwrap()
    }

    #[test]
    fn test_build_automatic_spacing() {
        let nested = NestingBoundary::new("bnd")
            .with_sampler(SamplerConfig::nearest(Some(1.0)))
            .build(&grid(), &ring_stations())
            .unwrap();
        assert!((nested.samples.spacing - 0.5).abs() < 1e-12);
        assert_eq!(nested.samples.len(), 24);
        assert_eq!(nested.data.n_sites(), 24);
        assert_eq!(nested.data.n_missing(), 0);
    }

    #[test]
    fn test_crop_excludes_far_sites() {
        let boundary = NestingBoundary::new("bnd").with_sampler(SamplerConfig::nearest(Some(1.0)));
        let sites = boundary.source_sites(&grid(), &ring_stations()).unwrap();
        assert_eq!(sites.n_sites(), 32);

        let uncropped = boundary
            .clone()
            .with_crop_source(false)
            .source_sites(&grid(), &ring_stations())
            .unwrap();
        assert_eq!(uncropped.n_sites(), 33);
    }

    #[test]
    fn test_unbounded_tolerance_keeps_every_site() {
        let boundary = NestingBoundary::new("bnd").with_sampler(SamplerConfig::nearest(None));
        let sites = boundary.source_sites(&grid(), &ring_stations()).unwrap();
        assert_eq!(sites.n_sites(), 33);
    }

    #[test]
    fn test_build_is_repeatable() {
        let boundary = NestingBoundary::new("bnd").with_sampler(SamplerConfig::idw(Some(1.0)));
        let a = boundary.build(&grid(), &ring_stations()).unwrap();
        let b = boundary.build(&grid(), &ring_stations()).unwrap();
        assert_eq!(a.samples, b.samples);
        let bits = |d: &ResampledDataset| {
            d.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        };
        assert_eq!(bits(&a.data), bits(&b.data));
    }

    #[test]
    fn test_invalid_sampler_rejected_before_work() {
        let err = NestingBoundary::new("bnd")
            .with_sampler(SamplerConfig::idw(Some(f64::NAN)))
            .build(&grid(), &ring_stations())
            .unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidTolerance(_)));
    }

    #[test]
    fn test_first_sample_at_first_hull_vertex() {
        let samples = NestingBoundary::new("bnd")
            .with_spacing(SpacingPolicy::Explicit(1.0))
            .boundary_samples(&grid(), &ring_stations())
            .unwrap();
        assert_eq!(samples.points[0], Point2D::new(0.0, 0.0));
        assert_eq!(samples.len(), 12);
    }
}
