//! Labelled N-dimensional arrays.
//!
//! A [`LabelledArray`] pairs an `ndarray` buffer with a string label for
//! every position along every axis, and a name for every axis.
//!
//! # Core Types
//!
//! - [`LabelledArray`]: the buffer plus its [`AxisLabels`] and axis names
//! - [`SelectionKey`]: one element of a label-based key (slice or label)
//! - [`AxisIndex`]: one element of a positional key (integer or slice)
//! - [`Selection`]: result of [`LabelledArray::sel`], shaped by how many axes survive
//!
//! # Example
//!
//! ```
//! use labelled_array::{sel, LabelledArray, Selection};
//! use ndarray::ArrayD;
//!
//! let values = ArrayD::from_shape_vec(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let arr = LabelledArray::new(
//!     values,
//!     vec![vec!["a", "b"], vec!["x", "y", "z"]],
//!     Some(vec!["row".to_string(), "col".to_string()]),
//! )
//! .unwrap();
//!
//! // A label collapses its axis, a slice keeps it.
//! let row = sel!(arr; "a", ..).unwrap().into_vector().unwrap();
//! assert_eq!(row.labels.as_slice(), &["x", "y", "z"]);
//! assert_eq!(row.values.to_vec(), vec![1.0, 2.0, 3.0]);
//!
//! assert_eq!(sel!(arr; "b", "x").unwrap(), Selection::Scalar(4.0));
//!
//! // Reductions and reorderings return new arrays.
//! let totals = arr.sum("row").unwrap();
//! assert_eq!(totals.axis_names(), &["col"]);
//! assert_eq!(arr.get_indexer(&["y", "q"], "col").unwrap(), vec![1, -1]);
//! ```

mod array;
mod error;
mod key;
mod labels;
mod options;
mod select;

pub use array::{AxisRef, LabelledArray};
pub use error::{LabelledArrayError, Result};
pub use key::{AxisIndex, AxisSlice, IntoSelectionKeys, ResolvedSlice, SelectionKey};
pub use labels::{AxisLabels, MISSING};
pub use options::{LabelledArrayOptions, DEFAULT_AXIS_NAME_PREFIX};
pub use select::{LabelledTable, LabelledVector, Selection};
