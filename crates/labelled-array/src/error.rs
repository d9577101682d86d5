//! Error types for labelled array operations.

use thiserror::Error;

/// Result type for labelled array operations.
pub type Result<T> = std::result::Result<T, LabelledArrayError>;

/// Errors that can occur while building, indexing or transforming a
/// [`LabelledArray`](crate::LabelledArray).
#[derive(Debug, Error)]
pub enum LabelledArrayError {
    /// Axis labels do not describe the buffer shape.
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// Axis names are malformed (wrong count or repeated names).
    #[error("Invalid axis names: {message}")]
    InvalidAxisNames { message: String },

    /// A key has the wrong number of elements for the array rank.
    #[error("Expected {expected} indices, got {actual}")]
    Arity { expected: usize, actual: usize },

    /// A label was not found on the requested axis.
    #[error("Key '{label}' not found in axis {axis} ('{axis_name}')")]
    LabelNotFound {
        label: String,
        axis: usize,
        axis_name: String,
    },

    /// A key element is not supported by the operation it was passed to.
    #[error("Invalid key type on axis {axis}: {message}")]
    InvalidKeyType { axis: usize, message: String },

    /// An axis name was not found among the array's axis names.
    #[error("Axis name '{name}' not found in axis names {available:?}")]
    AxisNameNotFound { name: String, available: Vec<String> },

    /// A positional axis reference is past the array rank.
    #[error("Axis {axis} out of bounds for array with {n_dims} dimensions")]
    AxisOutOfBounds { axis: isize, n_dims: usize },

    /// An axis reordering is not a permutation of the current axes.
    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    /// The same label appears twice on one axis.
    #[error("Duplicate label '{label}' on axis {axis}: positions {first_pos} and {duplicate_pos}")]
    DuplicateLabel {
        label: String,
        axis: usize,
        first_pos: usize,
        duplicate_pos: usize,
    },

    /// A label value is not acceptable.
    #[error("Invalid label at position {position} of axis {axis}: {message}")]
    InvalidLabel {
        axis: usize,
        position: usize,
        message: String,
    },

    /// A positional index is outside the buffer.
    #[error("Index {index} out of bounds for axis {axis} of size {size}")]
    IndexOutOfBounds { index: isize, axis: usize, size: usize },

    /// Assigned values do not have the shape of the addressed region.
    #[error("Value shape mismatch: expected {expected:?}, got {actual:?}")]
    ValueShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Error raised by the underlying `ndarray` buffer.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
