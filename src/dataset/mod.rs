//! Source datasets for boundary forcing.
//!
//! A source dataset is whatever the boundary data is resampled from: a
//! gridded model product or a set of spectral output stations. Its values
//! are opaque here. Each site carries a fixed-length record (a time
//! series, a flattened spectrum, ...) that is copied or blended as a whole.
//!
//! The [`SourceDataset`] trait is the seam to the data layer. Readers that
//! fetch data lazily implement [`SourceDataset::crop`] so that only the
//! sites around the target grid are materialized.
//!
//! | Type | Kind | Coordinates |
//! |------|------|-------------|
//! | [`GriddedDataset`] | `Structured` | 1D `x` and `y` axes |
//! | [`StationDataset`] | `Scattered` | one `(x, y)` per site |

mod error;
mod gridded;
mod resampled;
mod station;

pub use error::DatasetError;
pub use gridded::GriddedDataset;
pub use resampled::{MISSING_VALUE, ResampledDataset, SiteSelection};
pub use station::StationDataset;

use crate::types::BoundingBox;

/// Layout of a source dataset's coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceKind {
    /// Regular lattice with sorted 1D coordinate axes
    Structured,
    /// Irregularly located sites (stations)
    Scattered,
}

/// Dataset the boundary forcing is resampled from.
pub trait SourceDataset {
    /// Name of the core data variable (e.g. `"efth"` for wave spectra).
    fn variable(&self) -> &str;

    /// Coordinate layout.
    fn kind(&self) -> SourceKind;

    /// x-coordinates: the x-axis for structured data, one entry per site
    /// for scattered data.
    fn x_coords(&self) -> &[f64];

    /// y-coordinates: the y-axis for structured data, one entry per site
    /// for scattered data.
    fn y_coords(&self) -> &[f64];

    /// Sites inside `bbox` (inclusive), flattened to a station view.
    fn crop(&self, bbox: &BoundingBox) -> StationDataset;

    /// Every site, flattened to a station view.
    fn sites(&self) -> StationDataset;
}
