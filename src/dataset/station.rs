//! Scattered station datasets.

use super::{DatasetError, SourceDataset, SourceKind};
use crate::types::{BoundingBox, Point2D};

/// Irregularly located sites, each with a record of `record_len` values.
///
/// Values are stored site-major: site `i` owns
/// `values[i * record_len..(i + 1) * record_len]`.
///
/// # Example
///
/// ```
/// use nest_rs::dataset::{SourceDataset, StationDataset};
/// use nest_rs::types::BoundingBox;
///
/// let ds = StationDataset::new(
///     "hs",
///     vec![0.0, 10.0, 20.0],
///     vec![0.0, 10.0, 20.0],
///     1,
///     vec![1.0, 2.0, 3.0],
/// )
/// .unwrap();
///
/// let cropped = ds.crop(&BoundingBox::new(5.0, 5.0, 25.0, 25.0));
/// assert_eq!(cropped.n_sites(), 2);
/// assert_eq!(cropped.record(0), &[2.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationDataset {
    variable: String,
    x: Vec<f64>,
    y: Vec<f64>,
    record_len: usize,
    values: Vec<f64>,
}

impl StationDataset {
    /// Create a station dataset.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::CoordinateMismatch`] if `x` and `y` differ in length
    /// - [`DatasetError::DataShapeMismatch`] if `values.len() != n_sites * record_len`
    pub fn new(
        variable: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        record_len: usize,
        values: Vec<f64>,
    ) -> Result<Self, DatasetError> {
        if x.len() != y.len() {
            return Err(DatasetError::CoordinateMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        let expected = x.len() * record_len;
        if values.len() != expected {
            return Err(DatasetError::DataShapeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            variable: variable.into(),
            x,
            y,
            record_len,
            values,
        })
    }

    /// Number of sites.
    #[inline]
    pub fn n_sites(&self) -> usize {
        self.x.len()
    }

    /// Values per site.
    #[inline]
    pub fn record_len(&self) -> usize {
        self.record_len
    }

    /// Total number of data values (`n_sites * record_len`).
    #[inline]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// True if the data variable holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Location of site `i`.
    #[inline]
    pub fn point(&self, i: usize) -> Point2D {
        Point2D::new(self.x[i], self.y[i])
    }

    /// All site locations.
    pub fn points(&self) -> Vec<Point2D> {
        (0..self.n_sites()).map(|i| self.point(i)).collect()
    }

    /// Record of site `i`.
    #[inline]
    pub fn record(&self, i: usize) -> &[f64] {
        &self.values[i * self.record_len..(i + 1) * self.record_len]
    }

    /// Flat site-major data.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Keep only the sites for which `keep` returns true.
    fn filter_sites(&self, mut keep: impl FnMut(Point2D) -> bool) -> Self {
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut values = Vec::new();
        for i in 0..self.n_sites() {
            if keep(self.point(i)) {
                x.push(self.x[i]);
                y.push(self.y[i]);
                values.extend_from_slice(self.record(i));
            }
        }
        Self {
            variable: self.variable.clone(),
            x,
            y,
            record_len: self.record_len,
            values,
        }
    }
}

impl SourceDataset for StationDataset {
    fn variable(&self) -> &str {
        &self.variable
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Scattered
    }

    fn x_coords(&self) -> &[f64] {
        &self.x
    }

    fn y_coords(&self) -> &[f64] {
        &self.y
    }

    fn crop(&self, bbox: &BoundingBox) -> StationDataset {
        self.filter_sites(|p| bbox.contains_point(&p))
    }

    fn sites(&self) -> StationDataset {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_sites() -> StationDataset {
        StationDataset::new(
            "efth",
            vec![0.0, 10.0, 20.0],
            vec![0.0, 10.0, 20.0],
            2,
            vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5],
        )
        .unwrap()
    }

    #[test]
    fn test_records() {
        let ds = three_sites();
        assert_eq!(ds.n_sites(), 3);
        assert_eq!(ds.size(), 6);
        assert_eq!(ds.record(1), &[2.0, 2.5]);
        assert_eq!(ds.point(2), Point2D::new(20.0, 20.0));
        assert_eq!(ds.kind(), SourceKind::Scattered);
        assert_eq!(ds.variable(), "efth");
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            StationDataset::new("v", vec![0.0], vec![0.0, 1.0], 1, vec![0.0]),
            Err(DatasetError::CoordinateMismatch { x_len: 1, y_len: 2 })
        );
        assert_eq!(
            StationDataset::new("v", vec![0.0], vec![0.0], 3, vec![0.0]),
            Err(DatasetError::DataShapeMismatch {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn test_crop_inclusive() {
        let ds = three_sites();
        let c = ds.crop(&BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(c.n_sites(), 2);
        assert_eq!(c.record(1), &[2.0, 2.5]);
    }

    #[test]
    fn test_crop_to_nothing() {
        let c = three_sites().crop(&BoundingBox::new(100.0, 100.0, 101.0, 101.0));
        assert!(c.is_empty());
        assert_eq!(c.record_len(), 2);
    }
}
