//! Gridded (structured) source datasets.

use super::{DatasetError, SourceDataset, SourceKind, StationDataset};
use crate::types::BoundingBox;

/// Regular lattice of sites defined by sorted 1D `x` and `y` axes.
///
/// Values are stored `(ny, nx, record_len)` row-major: node `(j, i)` owns
/// the record starting at `(j * nx + i) * record_len`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GriddedDataset {
    variable: String,
    x: Vec<f64>,
    y: Vec<f64>,
    record_len: usize,
    values: Vec<f64>,
}

impl GriddedDataset {
    /// Create a gridded dataset.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::UnsortedAxis`] if an axis is not strictly increasing
    /// - [`DatasetError::DataShapeMismatch`] if `values.len() != ny * nx * record_len`
    pub fn new(
        variable: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        record_len: usize,
        values: Vec<f64>,
    ) -> Result<Self, DatasetError> {
        if !is_strictly_increasing(&x) {
            return Err(DatasetError::UnsortedAxis("x"));
        }
        if !is_strictly_increasing(&y) {
            return Err(DatasetError::UnsortedAxis("y"));
        }
        let expected = x.len() * y.len() * record_len;
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

    /// Grid shape `(ny, nx)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    /// Values per node.
    #[inline]
    pub fn record_len(&self) -> usize {
        self.record_len
    }

    /// Total number of data values.
    #[inline]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Record at node `(j, i)`.
    #[inline]
    pub fn record(&self, j: usize, i: usize) -> &[f64] {
        let start = (j * self.x.len() + i) * self.record_len;
        &self.values[start..start + self.record_len]
    }

    /// Flatten the nodes accepted by `keep` into a station view, row-major.
    fn flatten(&self, mut keep: impl FnMut(f64, f64) -> bool) -> StationDataset {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut values = Vec::new();
        for (j, &yj) in self.y.iter().enumerate() {
            for (i, &xi) in self.x.iter().enumerate() {
                if keep(xi, yj) {
                    xs.push(xi);
                    ys.push(yj);
                    values.extend_from_slice(self.record(j, i));
                }
            }
        }
        // Lengths agree by construction
        StationDataset::new(self.variable.clone(), xs, ys, self.record_len, values)
            .unwrap_or_else(|_| unreachable!("flattened grid has consistent shape"))
    }
}

fn is_strictly_increasing(axis: &[f64]) -> bool {
    axis.iter().all(|v| v.is_finite()) && axis.windows(2).all(|w| w[1] > w[0])
}

impl SourceDataset for GriddedDataset {
    fn variable(&self) -> &str {
        &self.variable
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Structured
    }

    fn x_coords(&self) -> &[f64] {
        &self.x
    }

    fn y_coords(&self) -> &[f64] {
        &self.y
    }

    fn crop(&self, bbox: &BoundingBox) -> StationDataset {
        self.flatten(|x, y| bbox.contains(x, y))
    }

    fn sites(&self) -> StationDataset {
        self.flatten(|_, _| true)
    }
}
