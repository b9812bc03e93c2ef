//! Resampling of source data onto boundary sites.
//!
//! Two selection strategies:
//!
//! - **Nearest**: each boundary site takes the record of its nearest source
//!   site. A site with no source site within `tolerance` is a hard error,
//!   since a gap in the boundary forcing would reach the solver unnoticed.
//! - **Inverse distance weighting**: each boundary site blends the records of
//!   up to `max_neighbors` source sites within `tolerance`, weighted by
//!   `1 / d^power`. Sites with fewer than two such neighbours are filled with
//!   [`MISSING_VALUE`] and reported with `tracing::warn!`. This is fine over
//!   masked land but leaves a hole on a true open boundary; use `Nearest` or
//!   a larger tolerance there.
//!
//! A boundary site that coincides with a source site copies its record in
//! both modes.
//!
//! # Example
//!
//! ```
//! use nest_rs::boundary::{BoundarySampler, SamplerConfig};
//! use nest_rs::dataset::StationDataset;
//! use nest_rs::types::Point2D;
//!
//! let source = StationDataset::new(
//!     "hs",
//!     vec![0.0, 1.0],
//!     vec![0.0, 0.0],
//!     1,
//!     vec![1.0, 3.0],
//! )
//! .unwrap();
//!
//! let config = SamplerConfig::default().with_tolerance(Some(2.0));
//! let sampler = BoundarySampler::new(config).unwrap();
//! let out = sampler.sample(&[Point2D::new(0.5, 0.0)], &source).unwrap();
//! assert_eq!(out.record(0), &[2.0]);
//! ```

use tracing::{debug, warn};

use super::BoundaryError;
use super::index::SiteIndex;
use crate::dataset::{MISSING_VALUE, ResampledDataset, SiteSelection, SourceDataset, StationDataset};
use crate::types::Point2D;

/// Source-site selection strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SelectionMethod {
    /// Single nearest source site, error if none within tolerance
    Nearest,
    /// Inverse-distance blend, missing value if fewer than two neighbours
    #[default]
    Idw,
}

/// Boundary sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplerConfig {
    /// Selection strategy
    pub method: SelectionMethod,
    /// Maximum distance to a usable source site (`None` = unbounded)
    pub tolerance: Option<f64>,
    /// Maximum number of IDW neighbours
    pub max_neighbors: usize,
    /// IDW distance exponent
    pub power: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            method: SelectionMethod::Idw,
            tolerance: Some(1.0),
            max_neighbors: 4,
            power: 1.0,
        }
    }
}

impl SamplerConfig {
    /// Nearest-neighbour selection within `tolerance`.
    pub fn nearest(tolerance: Option<f64>) -> Self {
        Self {
            method: SelectionMethod::Nearest,
            tolerance,
            ..Self::default()
        }
    }

    /// Inverse-distance weighting within `tolerance`.
    pub fn idw(tolerance: Option<f64>) -> Self {
        Self {
            method: SelectionMethod::Idw,
            tolerance,
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: SelectionMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_neighbors(mut self, n: usize) -> Self {
        self.max_neighbors = n;
        self
    }

    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Check the configuration for values the sampler cannot use.
    pub fn validate(&self) -> Result<(), BoundaryError> {
        if let Some(t) = self.tolerance {
            if !(t >= 0.0 && t.is_finite()) {
                return Err(BoundaryError::InvalidTolerance(t));
            }
        }
        if self.method == SelectionMethod::Idw {
            if self.max_neighbors < 2 {
                return Err(BoundaryError::InvalidConfig(format!(
                    "idw needs max_neighbors >= 2, got {}",
                    self.max_neighbors
                )));
            }
            if !(self.power >= 0.0 && self.power.is_finite()) {
                return Err(BoundaryError::InvalidConfig(format!(
                    "idw power must be finite and >= 0, got {}",
                    self.power
                )));
            }
        }
        Ok(())
    }

    fn max_distance_squared(&self) -> f64 {
        self.tolerance.map_or(f64::INFINITY, |t| t * t)
    }
}

/// Resamples a source dataset onto boundary sites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundarySampler {
    config: SamplerConfig,
}

impl BoundarySampler {
    /// # Errors
    ///
    /// Returns the first problem found by [`SamplerConfig::validate`].
    pub fn new(config: SamplerConfig) -> Result<Self, BoundaryError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Resample `source` onto `sites`, in site order.
    ///
    /// Selection indices in the result refer to `source.sites()`.
    ///
    /// # Errors
    ///
    /// - [`BoundaryError::EmptyResampledDataset`] if the source holds no data
    ///   or the result would be empty
    /// - [`BoundaryError::InsufficientNeighbors`] in nearest mode, for the
    ///   first site without a source site within tolerance
    pub fn sample<S>(
        &self,
        sites: &[Point2D],
        source: &S,
    ) -> Result<ResampledDataset, BoundaryError>
    where
        S: SourceDataset + ?Sized,
    {
        let data = self.prepare(source)?;
        let index = SiteIndex::new(&data.points());
        let selections = sites
            .iter()
            .enumerate()
            .map(|(i, &p)| self.select(&index, i, p))
            .collect::<Result<Vec<_>, _>>()?;
        self.assemble(sites, &data, selections)
    }

    /// Parallel version of [`sample`](Self::sample) using Rayon.
    ///
    /// Produces the same result, including which error is reported.
    #[cfg(feature = "parallel")]
    pub fn sample_parallel<S>(
        &self,
        sites: &[Point2D],
        source: &S,
    ) -> Result<ResampledDataset, BoundaryError>
    where
        S: SourceDataset + ?Sized,
    {
        use rayon::prelude::*;

        let data = self.prepare(source)?;
        let index = SiteIndex::new(&data.points());
        let outcomes: Vec<Result<SiteSelection, BoundaryError>> = sites
            .par_iter()
            .enumerate()
            .map(|(i, &p)| self.select(&index, i, p))
            .collect();
        // First failure in site order
        let selections = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;
        self.assemble(sites, &data, selections)
    }

    fn prepare<S>(&self, source: &S) -> Result<StationDataset, BoundaryError>
    where
        S: SourceDataset + ?Sized,
    {
        let data = source.sites();
        if data.is_empty() {
            return Err(BoundaryError::EmptyResampledDataset {
                variable: source.variable().to_string(),
                reason: format!(
                    "source has {} sites with {} values each",
                    data.n_sites(),
                    data.record_len()
                ),
            });
        }
        debug!(
            variable = source.variable(),
            n_sites = data.n_sites(),
            method = ?self.config.method,
            "sampling boundary sites"
        );
        Ok(data)
    }

    /// Source sites and weights for boundary site `site` at `p`.
    fn select(
        &self,
        index: &SiteIndex,
        site: usize,
        p: Point2D,
    ) -> Result<SiteSelection, BoundaryError> {
        let max_d2 = self.config.max_distance_squared();
        match self.config.method {
            SelectionMethod::Nearest => match index.nearest(p) {
                Some((d2, idx)) if d2 <= max_d2 => Ok(SiteSelection::single(idx)),
                _ => Err(BoundaryError::InsufficientNeighbors {
                    site,
                    x: p.x,
                    y: p.y,
                    tolerance: self.config.tolerance.unwrap_or(f64::INFINITY),
                }),
            },
            SelectionMethod::Idw => {
                let neighbours = index.neighbours(p, self.config.max_neighbors, max_d2);
                Ok(match neighbours.as_slice() {
                    [(d2, idx), ..] if *d2 == 0.0 => SiteSelection::single(*idx),
                    [] | [_] => SiteSelection::default(),
                    _ => idw_selection(&neighbours, self.config.power),
                })
            }
        }
    }

    fn assemble(
        &self,
        sites: &[Point2D],
        data: &StationDataset,
        selections: Vec<SiteSelection>,
    ) -> Result<ResampledDataset, BoundaryError> {
        let record_len = data.record_len();
        let mut values = Vec::with_capacity(sites.len() * record_len);
        for selection in &selections {
            if selection.is_empty() {
                values.extend(std::iter::repeat_n(MISSING_VALUE, record_len));
                continue;
            }
            let start = values.len();
            values.resize(start + record_len, 0.0);
            let out = &mut values[start..];
            for (&idx, &w) in selection.indices.iter().zip(&selection.weights) {
                for (o, &v) in out.iter_mut().zip(data.record(idx)) {
                    *o += w * v;
                }
            }
        }

        let n_missing = selections.iter().filter(|s| s.is_empty()).count();
        if n_missing > 0 {
            warn!(
                n_missing,
                n_sites = sites.len(),
                tolerance = ?self.config.tolerance,
                "boundary sites with fewer than 2 neighbours within tolerance set to missing"
            );
        }

        let variable = data.variable().to_string();
        if values.is_empty() {
            return Err(BoundaryError::EmptyResampledDataset {
                variable,
                reason: format!("no values for {} boundary sites", sites.len()),
            });
        }
        Ok(ResampledDataset::new(
            variable,
            sites.to_vec(),
            record_len,
            values,
            selections,
        ))
    }
}

/// Normalized inverse-distance weights over `(squared distance, index)` pairs,
/// ordered by distance with the nearest at a non-zero distance.
///
/// Weights are taken relative to the nearest neighbour, `(d_min / d)^power`,
/// so every raw weight lies in `(0, 1]` and the sum is at least 1 even when
/// `d^-power` would overflow.
fn idw_selection(neighbours: &[(f64, usize)], power: f64) -> SiteSelection {
    let d_min = neighbours.first().map_or(1.0, |&(d2, _)| d2.sqrt());
    let raw: Vec<f64> = neighbours
        .iter()
        .map(|&(d2, _)| (d_min / d2.sqrt()).powf(power))
        .collect();
    let total: f64 = raw.iter().sum();
    SiteSelection {
        indices: neighbours.iter().map(|&(_, idx)| idx).collect(),
        weights: raw.iter().map(|w| w / total).collect(),
    }
}
