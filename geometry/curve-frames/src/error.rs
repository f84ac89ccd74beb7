//! Error types for frame computation.

use thiserror::Error;

/// Result type for frame operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors that can occur while configuring or running a frame computation.
///
/// Degenerate geometry (short cells, coincident points) is not an error: the
/// affected points keep their zero default and the computation carries on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameError {
    /// An output array name is empty.
    #[error("{array} array name is not specified")]
    MissingArrayName {
        /// Which output array is missing its name ("tangents", "normals" or "binormals").
        array: &'static str,
    },

    /// A numeric setting is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A cell references a point that is not in the point array.
    #[error("cell {cell} references point {index}, but only {num_points} points exist")]
    PointIndexOutOfRange {
        /// Index of the offending cell.
        cell: usize,
        /// The out-of-range point index.
        index: usize,
        /// Number of points in the point array.
        num_points: usize,
    },

    /// A cell index does not exist in the curve set.
    #[error("cell {cell} does not exist, the curve set has {num_cells} cells")]
    CellIndexOutOfRange {
        /// The requested cell.
        cell: usize,
        /// Number of cells in the curve set.
        num_cells: usize,
    },

    /// Output arrays were allocated for a different number of points.
    #[error("output arrays hold {actual} points, expected {expected}")]
    ArrayLengthMismatch {
        /// Number of points in the curve set.
        expected: usize,
        /// Length of the output arrays.
        actual: usize,
    },
}

impl FrameError {
    /// Create a missing array name error.
    #[must_use]
    pub const fn missing_array_name(array: &'static str) -> Self {
        Self::MissingArrayName { array }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig(details.into())
    }

    /// Check if this is a configuration error (missing name or bad setting).
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::MissingArrayName { .. } | Self::InvalidConfig(_))
    }

    /// Check if this is an out-of-range point index error.
    #[must_use]
    pub fn is_point_index_out_of_range(&self) -> bool {
        matches!(self, Self::PointIndexOutOfRange { .. })
    }
}
