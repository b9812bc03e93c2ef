//! Boundary data resampled from a source dataset.

use crate::types::Point2D;

/// Marker stored in every value of a site that could not be filled.
pub const MISSING_VALUE: f64 = f64::NAN;

/// Source sites selected for one boundary site, with their blend weights.
///
/// Weights are normalized to sum to one. An empty selection marks a
/// missing site.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteSelection {
    pub indices: Vec<usize>,
    pub weights: Vec<f64>,
}

impl SiteSelection {
    /// Single source site with full weight.
    pub fn single(index: usize) -> Self {
        Self {
            indices: vec![index],
            weights: vec![1.0],
        }
    }

    /// True if no source site contributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Source data resampled onto the boundary sites.
///
/// One record per boundary site, in boundary order. Missing sites carry
/// [`MISSING_VALUE`] in every slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResampledDataset {
    variable: String,
    sites: Vec<Point2D>,
    record_len: usize,
    values: Vec<f64>,
    selections: Vec<SiteSelection>,
}

impl ResampledDataset {
    pub(crate) fn new(
        variable: String,
        sites: Vec<Point2D>,
        record_len: usize,
        values: Vec<f64>,
        selections: Vec<SiteSelection>,
    ) -> Self {
        debug_assert_eq!(values.len(), sites.len() * record_len);
        debug_assert_eq!(selections.len(), sites.len());
        Self {
            variable,
            sites,
            record_len,
            values,
            selections,
        }
    }

    /// Name of the resampled data variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Boundary site locations.
    pub fn sites(&self) -> &[Point2D] {
        &self.sites
    }

    #[inline]
    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn record_len(&self) -> usize {
        self.record_len
    }

    /// Total number of data values.
    #[inline]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Record of boundary site `i`.
    #[inline]
    pub fn record(&self, i: usize) -> &[f64] {
        &self.values[i * self.record_len..(i + 1) * self.record_len]
    }

    /// Flat site-major data.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Source selection behind boundary site `i`.
    pub fn selection(&self, i: usize) -> &SiteSelection {
        &self.selections[i]
    }

    /// True if boundary site `i` holds the missing-value marker.
    pub fn is_missing(&self, i: usize) -> bool {
        self.selections[i].is_empty()
    }

    /// Number of missing boundary sites.
    pub fn n_missing(&self) -> usize {
        self.selections.iter().filter(|s| s.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bookkeeping() {
        let ds = ResampledDataset::new(
            "efth".into(),
            vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)],
            2,
            vec![1.0, 2.0, MISSING_VALUE, MISSING_VALUE],
            vec![SiteSelection::single(3), SiteSelection::default()],
        );
        assert_eq!(ds.size(), 4);
        assert!(!ds.is_missing(0));
        assert!(ds.is_missing(1));
        assert_eq!(ds.n_missing(), 1);
        assert_eq!(ds.record(0), &[1.0, 2.0]);
        assert!(ds.record(1).iter().all(|v| v.is_nan()));
        assert_eq!(ds.selection(0).weights, vec![1.0]);
    }
}
