//! Label-based selection.
//!
//! A selection key has one element per axis. A slice keeps its axis (the
//! axis labels are sliced the same way as the buffer); a label collapses its
//! axis to the labelled position. The shape of the result depends on how many
//! axes are kept:
//!
//! | kept axes | result                      |
//! |-----------|-----------------------------|
//! | 0         | [`Selection::Scalar`]       |
//! | 1         | [`Selection::Vector`]       |
//! | 2         | [`Selection::Table`]        |
//! | 3 or more | [`Selection::Array`]        |

use ndarray::{Array1, Array2, Ix0, Ix1, Ix2};

use crate::array::{slice_info, LabelledArray};
use crate::error::{LabelledArrayError, Result};
use crate::key::{IntoSelectionKeys, ResolvedIndex, SelectionKey};
use crate::labels::AxisLabels;

/// One-dimensional result of a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledVector<T> {
    /// Name of the kept axis.
    pub name: String,
    /// Labels of the kept positions, in order.
    pub labels: AxisLabels,
    /// Values aligned with `labels`.
    pub values: Array1<T>,
}

impl<T> LabelledVector<T> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no element was selected.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value stored under `label`.
    pub fn get(&self, label: &str) -> Option<&T> {
        self.labels.position(label).map(|pos| &self.values[pos])
    }

    /// `(label, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.labels.iter().zip(self.values.iter())
    }
}

/// Two-dimensional result of a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledTable<T> {
    /// Name of the first kept axis.
    pub row_name: String,
    /// Name of the second kept axis.
    pub column_name: String,
    /// Labels along the rows.
    pub row_labels: AxisLabels,
    /// Labels along the columns.
    pub column_labels: AxisLabels,
    /// Values, rows first.
    pub values: Array2<T>,
}

impl<T> LabelledTable<T> {
    /// `(rows, columns)`.
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Value at the given row and column labels.
    pub fn get(&self, row: &str, column: &str) -> Option<&T> {
        let r = self.row_labels.position(row)?;
        let c = self.column_labels.position(column)?;
        Some(&self.values[[r, c]])
    }
}

/// Result of [`LabelledArray::sel`].
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    Scalar(T),
    Vector(LabelledVector<T>),
    Table(LabelledTable<T>),
    /// Three or more kept axes, relabelled with the kept axes only.
    Array(LabelledArray<T>),
}

impl<T> Selection<T> {
    /// Number of kept axes.
    pub fn ndim(&self) -> usize {
        match self {
            Selection::Scalar(_) => 0,
            Selection::Vector(_) => 1,
            Selection::Table(_) => 2,
            Selection::Array(arr) => arr.n_dims(),
        }
    }

    pub fn into_scalar(self) -> Option<T> {
        match self {
            Selection::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<LabelledVector<T>> {
        match self {
            Selection::Vector(vector) => Some(vector),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<LabelledTable<T>> {
        match self {
            Selection::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<LabelledArray<T>> {
        match self {
            Selection::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

/// Positional form of a selection key.
#[derive(Debug)]
struct ResolvedSelection {
    positional: Vec<ResolvedIndex>,
    /// Axes addressed by a slice, in axis order.
    retained: Vec<usize>,
}

impl ResolvedSelection {
    fn retained_labels<T>(&self, arr: &LabelledArray<T>, axis: usize) -> AxisLabels {
        match self.positional[axis] {
            ResolvedIndex::Slice(slice) => arr.axis_labels()[axis].take(slice.indices()),
            ResolvedIndex::Index(_) => unreachable!("axis {axis} is collapsed"),
        }
    }
}

impl<T> LabelledArray<T> {
    fn resolve_selection(&self, keys: &[SelectionKey]) -> Result<ResolvedSelection> {
        if keys.len() != self.n_dims() {
            return Err(LabelledArrayError::Arity {
                expected: self.n_dims(),
                actual: keys.len(),
            });
        }

        let mut positional = Vec::with_capacity(keys.len());
        let mut retained = Vec::new();
        for (axis, key) in keys.iter().enumerate() {
            match key {
                SelectionKey::Slice(slice) => {
                    positional.push(ResolvedIndex::Slice(
                        slice.resolve(self.shape()[axis], axis)?,
                    ));
                    retained.push(axis);
                }
                SelectionKey::Label(label) => {
                    let pos = self.axis_labels()[axis].position(label).ok_or_else(|| {
                        LabelledArrayError::LabelNotFound {
                            label: label.clone(),
                            axis,
                            axis_name: self.axis_names()[axis].clone(),
                        }
                    })?;
                    positional.push(ResolvedIndex::Index(pos));
                }
                SelectionKey::Labels(_) => {
                    return Err(LabelledArrayError::InvalidKeyType {
                        axis,
                        message: "selecting several labels on one axis is not supported"
                            .to_string(),
                    });
                }
            }
        }

        tracing::trace!(n_dims = self.n_dims(), retained = ?retained, "resolved selection");

        Ok(ResolvedSelection {
            positional,
            retained,
        })
    }
}

impl<T: Clone> LabelledArray<T> {
    /// Select by label.
    ///
    /// `key` is either a single key (for one-dimensional arrays) or one key
    /// per axis. Each key is a slice, which keeps the axis, or a label, which
    /// collapses it. The result is shaped by the number of kept axes.
    ///
    /// # Errors
    /// - [`LabelledArrayError::Arity`] if the key count differs from [`n_dims`](Self::n_dims).
    /// - [`LabelledArrayError::LabelNotFound`] if a label is absent from its axis.
    /// - [`LabelledArrayError::InvalidKeyType`] for multi-label keys or a zero slice step.
    ///
    /// # Example
    /// ```
    /// use labelled_array::{LabelledArray, SelectionKey};
    /// use ndarray::ArrayD;
    ///
    /// let values = ArrayD::from_shape_vec(vec![2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// let arr = LabelledArray::new(values, vec![vec!["a", "b"], vec!["x", "y", "z"]], None).unwrap();
    ///
    /// let value = arr.sel([SelectionKey::from("b"), SelectionKey::from("y")]).unwrap();
    /// assert_eq!(value.into_scalar(), Some(5));
    ///
    /// let column = arr.sel([SelectionKey::full(), SelectionKey::from("z")]).unwrap().into_vector().unwrap();
    /// assert_eq!(column.labels.as_slice(), &["a", "b"]);
    /// assert_eq!(column.values.to_vec(), vec![3, 6]);
    /// ```
    pub fn sel<K: IntoSelectionKeys>(&self, key: K) -> Result<Selection<T>> {
        let keys = key.into_selection_keys();
        let resolved = self.resolve_selection(&keys)?;

        let elems = resolved
            .positional
            .iter()
            .map(|index| index.to_slice_elem())
            .collect();
        let info = slice_info(elems)?;
        let result = self.values().slice(&info);

        assert_eq!(
            result.ndim(),
            resolved.retained.len(),
            "selection kept {} axes but produced a {}-dimensional result",
            resolved.retained.len(),
            result.ndim()
        );

        let names = self.axis_names();
        let selection = match resolved.retained.as_slice() {
            [] => Selection::Scalar(result.into_dimensionality::<Ix0>()?.into_scalar().clone()),
            &[axis] => Selection::Vector(LabelledVector {
                name: names[axis].clone(),
                labels: resolved.retained_labels(self, axis),
                values: result.into_dimensionality::<Ix1>()?.to_owned(),
            }),
            &[row, column] => Selection::Table(LabelledTable {
                row_name: names[row].clone(),
                column_name: names[column].clone(),
                row_labels: resolved.retained_labels(self, row),
                column_labels: resolved.retained_labels(self, column),
                values: result.into_dimensionality::<Ix2>()?.to_owned(),
            }),
            retained => {
                let axis_labels = retained
                    .iter()
                    .map(|&axis| resolved.retained_labels(self, axis))
                    .collect();
                let axis_names = retained.iter().map(|&axis| names[axis].clone()).collect();
                Selection::Array(LabelledArray::from_parts_unchecked(
                    result.as_standard_layout().into_owned(),
                    axis_labels,
                    axis_names,
                ))
            }
        };
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::AxisSlice;
    use ndarray::ArrayD;

    fn cube() -> LabelledArray<i64> {
        let values = ArrayD::from_shape_vec(vec![2, 3, 4], (0..24).collect()).unwrap();
        LabelledArray::new(
            values,
            vec![
                vec!["a", "b"],
                vec!["x", "y", "z"],
                vec!["p", "q", "r", "s"],
            ],
            Some(vec!["i".to_string(), "j".to_string(), "k".to_string()]),
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_marks_retained_axes() {
        let arr = cube();
        let keys = vec![
            SelectionKey::label("b"),
            SelectionKey::full(),
            SelectionKey::label("q"),
        ];
        let resolved = arr.resolve_selection(&keys).unwrap();
        assert_eq!(resolved.retained, vec![1]);
        assert_eq!(resolved.positional[0], ResolvedIndex::Index(1));
        assert_eq!(resolved.positional[2], ResolvedIndex::Index(1));
    }

    #[test]
    fn test_table_from_cube() {
        let arr = cube();
        let table = arr
            .sel(vec![
                SelectionKey::full(),
                SelectionKey::label("z"),
                SelectionKey::Slice(AxisSlice::range(1, 3)),
            ])
            .unwrap()
            .into_table()
            .unwrap();
        assert_eq!(table.row_name, "i");
        assert_eq!(table.column_name, "k");
        assert_eq!(table.row_labels, AxisLabels::from(["a", "b"]));
        assert_eq!(table.column_labels, AxisLabels::from(["q", "r"]));
        // cube[i, 2, k] = 12 * i + 8 + k
        assert_eq!(table.values, ndarray::arr2(&[[9, 10], [21, 22]]));
        assert_eq!(table.get("b", "r"), Some(&22));
    }

    #[test]
    fn test_three_kept_axes_keep_labels() {
        let arr = cube();
        let sub = arr
            .sel(vec![
                SelectionKey::full(),
                SelectionKey::Slice(AxisSlice::full().with_step(-1)),
                SelectionKey::Slice(AxisSlice::new(None, None, 2)),
            ])
            .unwrap()
            .into_array()
            .unwrap();
        assert_eq!(sub.shape(), &[2, 3, 2]);
        assert_eq!(sub.axis_names(), arr.axis_names());
        assert_eq!(sub.axis_labels()[1], AxisLabels::from(["z", "y", "x"]));
        assert_eq!(sub.axis_labels()[2], AxisLabels::from(["p", "r"]));
        assert_eq!(sub.values()[[0, 0, 1]], 10);
        assert_eq!(sub.values()[[1, 2, 0]], 12);
    }

    #[test]
    fn test_labels_key_rejected() {
        let arr = cube();
        let err = arr
            .sel(vec![
                SelectionKey::from(vec!["a", "b"]),
                SelectionKey::full(),
                SelectionKey::full(),
            ])
            .unwrap_err();
        assert!(matches!(err, LabelledArrayError::InvalidKeyType { axis: 0, .. }));
    }

    #[test]
    fn test_label_not_found_names_axis() {
        let arr = cube();
        let err = arr
            .sel(vec![
                SelectionKey::full(),
                SelectionKey::label("w"),
                SelectionKey::full(),
            ])
            .unwrap_err();
        match err {
            LabelledArrayError::LabelNotFound {
                label,
                axis,
                axis_name,
            } => {
                assert_eq!(label, "w");
                assert_eq!(axis, 1);
                assert_eq!(axis_name, "j");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
