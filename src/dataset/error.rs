//! Dataset construction errors.

use thiserror::Error;

/// Error type for in-memory source datasets.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DatasetError {
    /// Coordinate arrays differ in length
    #[error("Coordinate length mismatch: x has {x_len} values, y has {y_len}")]
    CoordinateMismatch { x_len: usize, y_len: usize },

    /// Data array does not match coordinates × record length
    #[error("Data shape mismatch: expected {expected} values, got {actual}")]
    DataShapeMismatch { expected: usize, actual: usize },

    /// A structured axis is not strictly increasing
    #[error("Axis {0} must be strictly increasing")]
    UnsortedAxis(&'static str),
}
