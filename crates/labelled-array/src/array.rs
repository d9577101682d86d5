//! The labelled N-dimensional array.

use std::collections::HashMap;
use std::fmt;

use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Axis, IxDyn, SliceInfo, SliceInfoElem};
use num_traits::Zero;

use crate::error::{LabelledArrayError, Result};
use crate::key::AxisIndex;
use crate::labels::AxisLabels;
use crate::options::LabelledArrayOptions;

/// Build an `ndarray` slice descriptor with dynamic input and output rank.
pub(crate) fn slice_info(
    elems: Vec<SliceInfoElem>,
) -> Result<SliceInfo<Vec<SliceInfoElem>, IxDyn, IxDyn>> {
    let info = SliceInfo::<Vec<SliceInfoElem>, IxDyn, IxDyn>::try_from(elems)?;
    Ok(info)
}

/// Reference to an axis, either by position or by name.
///
/// Unsuffixed integer literals convert through `i32`, so `arr.sum(1)` and
/// `arr.sum(-1)` both work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AxisRef {
    /// Position counted from the first axis.
    Position(usize),
    /// Position that may be negative; `-1` is the last axis.
    Offset(isize),
    /// Axis name.
    Name(String),
}

impl From<usize> for AxisRef {
    fn from(pos: usize) -> Self {
        Self::Position(pos)
    }
}

impl From<isize> for AxisRef {
    fn from(offset: isize) -> Self {
        Self::Offset(offset)
    }
}

impl From<i32> for AxisRef {
    fn from(offset: i32) -> Self {
        Self::Offset(offset as isize)
    }
}

impl From<&str> for AxisRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for AxisRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for AxisRef {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

/// An N-dimensional buffer with string labels along every axis and a name
/// for every axis.
///
/// The axis structure (shape, labels, names) is fixed at construction. The
/// buffer contents can be changed in place through positional access;
/// operations that change the structure ([`rearrange`](Self::rearrange),
/// [`sum`](Self::sum)) return a new array.
///
/// # Example
/// ```
/// use labelled_array::LabelledArray;
/// use ndarray::ArrayD;
///
/// let values = ArrayD::from_shape_vec(vec![2, 3], (0..6).map(f64::from).collect()).unwrap();
/// let arr = LabelledArray::new(
///     values,
///     vec![vec!["a", "b"], vec!["x", "y", "z"]],
///     Some(vec!["row".to_string(), "col".to_string()]),
/// )
/// .unwrap();
///
/// assert_eq!(arr.shape(), &[2, 3]);
/// assert_eq!(arr.labels("col").unwrap().as_slice(), &["x", "y", "z"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledArray<T> {
    values: ArrayD<T>,
    axis_labels: Vec<AxisLabels>,
    axis_names: Vec<String>,
}

impl<T> LabelledArray<T> {
    /// Create a labelled array with default options.
    ///
    /// When `axis_names` is `None` the axes are named `axis_0`, `axis_1`, ...
    ///
    /// # Errors
    /// - [`LabelledArrayError::ShapeMismatch`] if the number of label vectors
    ///   differs from the buffer rank, or a label vector's length differs from
    ///   the corresponding buffer dimension.
    /// - [`LabelledArrayError::InvalidAxisNames`] if `axis_names` has the wrong
    ///   length or repeats a name.
    /// - [`LabelledArrayError::DuplicateLabel`] / [`LabelledArrayError::InvalidLabel`]
    ///   if an axis repeats a label or contains an empty label.
    pub fn new<L>(
        values: ArrayD<T>,
        axis_labels: Vec<L>,
        axis_names: Option<Vec<String>>,
    ) -> Result<Self>
    where
        L: Into<AxisLabels>,
    {
        Self::with_options(
            values,
            axis_labels,
            axis_names,
            &LabelledArrayOptions::default(),
        )
    }

    /// Create a labelled array with explicit options.
    pub fn with_options<L>(
        values: ArrayD<T>,
        axis_labels: Vec<L>,
        axis_names: Option<Vec<String>>,
        options: &LabelledArrayOptions,
    ) -> Result<Self>
    where
        L: Into<AxisLabels>,
    {
        let axis_labels: Vec<AxisLabels> = axis_labels.into_iter().map(Into::into).collect();

        if axis_labels.len() != values.ndim() {
            return Err(LabelledArrayError::ShapeMismatch {
                message: format!(
                    "Expected {} axis labels, got {}",
                    values.ndim(),
                    axis_labels.len()
                ),
            });
        }
        for (axis, (labels, &dim)) in axis_labels.iter().zip(values.shape()).enumerate() {
            if labels.len() != dim {
                return Err(LabelledArrayError::ShapeMismatch {
                    message: format!(
                        "Expected {} axis labels for axis {}, got {}",
                        dim,
                        axis,
                        labels.len()
                    ),
                });
            }
        }

        let axis_names = match axis_names {
            Some(names) => {
                check_axis_names(&names, values.ndim())?;
                names
            }
            None => options.default_axis_names(values.ndim()),
        };

        for (axis, labels) in axis_labels.iter().enumerate() {
            labels.validate(axis, options)?;
        }

        tracing::debug!(
            shape = ?values.shape(),
            axis_names = ?axis_names,
            "constructed labelled array"
        );

        Ok(Self {
            values,
            axis_labels,
            axis_names,
        })
    }

    /// Assemble an array whose invariants the caller already guarantees.
    pub(crate) fn from_parts_unchecked(
        values: ArrayD<T>,
        axis_labels: Vec<AxisLabels>,
        axis_names: Vec<String>,
    ) -> Self {
        debug_assert_eq!(axis_labels.len(), values.ndim());
        debug_assert_eq!(axis_names.len(), values.ndim());
        Self {
            values,
            axis_labels,
            axis_names,
        }
    }

    /// Shape of the buffer.
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Number of axes.
    pub fn n_dims(&self) -> usize {
        self.values.ndim()
    }

    /// The underlying buffer.
    pub fn values(&self) -> &ArrayD<T> {
        &self.values
    }

    /// Mutable access to the buffer contents. The shape cannot be changed
    /// through this reference.
    pub fn values_mut(&mut self) -> ArrayViewMutD<'_, T> {
        self.values.view_mut()
    }

    /// Consume the array and return the buffer.
    pub fn into_values(self) -> ArrayD<T> {
        self.values
    }

    /// Consume the array and return buffer, labels and names.
    pub fn into_parts(self) -> (ArrayD<T>, Vec<AxisLabels>, Vec<String>) {
        (self.values, self.axis_labels, self.axis_names)
    }

    /// Label vectors in axis order.
    pub fn axis_labels(&self) -> &[AxisLabels] {
        &self.axis_labels
    }

    /// Axis names in axis order.
    pub fn axis_names(&self) -> &[String] {
        &self.axis_names
    }

    /// Label vector of the axis called `axis_name`.
    pub fn labels(&self, axis_name: &str) -> Result<&AxisLabels> {
        let pos = self.axis_position(axis_name)?;
        Ok(&self.axis_labels[pos])
    }

    /// Position of the axis called `axis_name`.
    pub fn axis_position(&self, axis_name: &str) -> Result<usize> {
        self.axis_names
            .iter()
            .position(|name| name == axis_name)
            .ok_or_else(|| LabelledArrayError::AxisNameNotFound {
                name: axis_name.to_string(),
                available: self.axis_names.clone(),
            })
    }

    /// Resolve a positional or named axis reference to a position.
    pub fn axis_index(&self, axis: impl Into<AxisRef>) -> Result<usize> {
        let n_dims = self.n_dims();
        let out_of_bounds = |axis: isize| LabelledArrayError::AxisOutOfBounds { axis, n_dims };
        match axis.into() {
            AxisRef::Position(pos) if pos < n_dims => Ok(pos),
            AxisRef::Position(pos) => Err(out_of_bounds(isize::try_from(pos).unwrap_or(isize::MAX))),
            AxisRef::Offset(offset) => {
                let pos = if offset < 0 {
                    offset.checked_add(n_dims as isize)
                } else {
                    Some(offset)
                };
                match pos {
                    Some(pos) if (0..n_dims as isize).contains(&pos) => Ok(pos as usize),
                    _ => Err(out_of_bounds(offset)),
                }
            }
            AxisRef::Name(name) => self.axis_position(&name),
        }
    }

    /// Positional view of the buffer.
    ///
    /// `key` holds one element per leading axis; missing trailing axes are
    /// taken whole. Integer elements drop their axis from the view.
    pub fn get(&self, key: &[AxisIndex]) -> Result<ArrayViewD<'_, T>> {
        let info = slice_info(self.positional_elems(key)?)?;
        Ok(self.values.slice(&info))
    }

    /// Mutable positional view of the buffer.
    pub fn get_mut(&mut self, key: &[AxisIndex]) -> Result<ArrayViewMutD<'_, T>> {
        let info = slice_info(self.positional_elems(key)?)?;
        Ok(self.values.slice_mut(&info))
    }

    /// Positions of `keys` along `axis`, `-1` for keys that are not labels
    /// of that axis.
    ///
    /// Only the axis reference can fail; missing keys never do.
    pub fn get_indexer<S: AsRef<str>>(
        &self,
        keys: &[S],
        axis: impl Into<AxisRef>,
    ) -> Result<Vec<isize>> {
        let pos = self.axis_index(axis)?;
        Ok(self.axis_labels[pos].get_indexer(keys))
    }

    fn positional_elems(&self, key: &[AxisIndex]) -> Result<Vec<SliceInfoElem>> {
        if key.len() > self.n_dims() {
            return Err(LabelledArrayError::Arity {
                expected: self.n_dims(),
                actual: key.len(),
            });
        }
        let shape = self.values.shape();
        (0..self.n_dims())
            .map(|axis| -> Result<SliceInfoElem> {
                let elem = key.get(axis).copied().unwrap_or_else(AxisIndex::full);
                Ok(elem.resolve(shape[axis], axis)?.to_slice_elem())
            })
            .collect()
    }
}

impl<T: Clone> LabelledArray<T> {
    /// Fill the positionally addressed region with `value`.
    pub fn set(&mut self, key: &[AxisIndex], value: T) -> Result<()> {
        self.get_mut(key)?.fill(value);
        Ok(())
    }

    /// Overwrite the positionally addressed region with `values`, which must
    /// have exactly the region's shape.
    pub fn assign(&mut self, key: &[AxisIndex], values: &ArrayD<T>) -> Result<()> {
        let mut region = self.get_mut(key)?;
        if region.shape() != values.shape() {
            return Err(LabelledArrayError::ValueShapeMismatch {
                expected: region.shape().to_vec(),
                actual: values.shape().to_vec(),
            });
        }
        region.assign(values);
        Ok(())
    }

    /// Reorder the axes by name.
    ///
    /// `new_axis_order` must name every axis exactly once. The returned array
    /// owns a standard-layout copy of the transposed buffer.
    ///
    /// # Errors
    /// - [`LabelledArrayError::AxisNameNotFound`] for an unknown name.
    /// - [`LabelledArrayError::InvalidPermutation`] if names are missing or repeated.
    pub fn rearrange<S: AsRef<str>>(&self, new_axis_order: &[S]) -> Result<Self> {
        let mut perm = Vec::with_capacity(new_axis_order.len());
        let mut seen = HashMap::with_capacity(new_axis_order.len());
        for (new_pos, name) in new_axis_order.iter().enumerate() {
            let name = name.as_ref();
            let old_pos = self.axis_position(name)?;
            if let Some(first) = seen.insert(old_pos, new_pos) {
                return Err(LabelledArrayError::InvalidPermutation(format!(
                    "axis '{}' appears at positions {} and {}",
                    name, first, new_pos
                )));
            }
            perm.push(old_pos);
        }
        if perm.len() != self.n_dims() {
            return Err(LabelledArrayError::InvalidPermutation(format!(
                "expected {} axis names, got {}",
                self.n_dims(),
                perm.len()
            )));
        }

        let values = self
            .values
            .view()
            .permuted_axes(perm.as_slice())
            .as_standard_layout()
            .into_owned();
        let axis_labels = perm.iter().map(|&i| self.axis_labels[i].clone()).collect();
        let axis_names = perm.iter().map(|&i| self.axis_names[i].clone()).collect();

        tracing::debug!(perm = ?perm, "rearranged labelled array");

        Ok(Self::from_parts_unchecked(values, axis_labels, axis_names))
    }
}

impl<T: Clone + Zero> LabelledArray<T> {
    /// Sum over one axis, given by position or name.
    ///
    /// The summed axis is removed; the remaining axes keep their order,
    /// labels and names.
    pub fn sum(&self, axis: impl Into<AxisRef>) -> Result<Self> {
        let pos = self.axis_index(axis)?;
        let values = self.values.sum_axis(Axis(pos));

        let mut axis_labels = self.axis_labels.clone();
        let mut axis_names = self.axis_names.clone();
        axis_labels.remove(pos);
        let removed = axis_names.remove(pos);

        tracing::debug!(axis = pos, axis_name = %removed, "summed labelled array");

        Ok(Self::from_parts_unchecked(values, axis_labels, axis_names))
    }
}

impl<T> fmt::Display for LabelledArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LabelledArray(shape={:?}, axis_names={:?})",
            self.shape(),
            self.axis_names
        )
    }
}

fn check_axis_names(names: &[String], n_dims: usize) -> Result<()> {
    if names.len() != n_dims {
        return Err(LabelledArrayError::InvalidAxisNames {
            message: format!("expected {} axis names, got {}", n_dims, names.len()),
        });
    }
    for (pos, name) in names.iter().enumerate() {
        if let Some(first) = names[..pos].iter().position(|other| other == name) {
            return Err(LabelledArrayError::InvalidAxisNames {
                message: format!(
                    "axis name '{}' used for axes {} and {}",
                    name, first, pos
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::AxisSlice;

    fn names(names: &[&str]) -> Option<Vec<String>> {
        Some(names.iter().map(|s| s.to_string()).collect())
    }

    fn table() -> LabelledArray<f64> {
        let values =
            ArrayD::from_shape_vec(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        LabelledArray::new(
            values,
            vec![vec!["a", "b"], vec!["x", "y", "z"]],
            names(&["row", "col"]),
        )
        .unwrap()
    }

    #[test]
    fn test_default_axis_names() {
        let values = ArrayD::<f64>::zeros(vec![1, 2, 3]);
        let arr = LabelledArray::new(
            values,
            vec![vec!["a"], vec!["b", "c"], vec!["d", "e", "f"]],
            None,
        )
        .unwrap();
        assert_eq!(arr.axis_names(), &["axis_0", "axis_1", "axis_2"]);
        assert_eq!(arr.n_dims(), 3);
    }

    #[test]
    fn test_custom_prefix() {
        let values = ArrayD::<f64>::zeros(vec![2]);
        let opts = LabelledArrayOptions::default().with_axis_name_prefix("dim");
        let arr = LabelledArray::with_options(values, vec![vec!["a", "b"]], None, &opts).unwrap();
        assert_eq!(arr.axis_names(), &["dim0"]);
    }

    #[test]
    fn test_axis_names_wrong_length() {
        let values = ArrayD::<f64>::zeros(vec![2]);
        let err = LabelledArray::new(values, vec![vec!["a", "b"]], names(&["x", "y"])).unwrap_err();
        assert!(matches!(err, LabelledArrayError::InvalidAxisNames { .. }));
    }

    #[test]
    fn test_axis_names_repeated() {
        let values = ArrayD::<f64>::zeros(vec![1, 1]);
        let err = LabelledArray::new(values, vec![vec!["a"], vec!["b"]], names(&["x", "x"]))
            .unwrap_err();
        assert!(matches!(err, LabelledArrayError::InvalidAxisNames { .. }));
    }

    #[test]
    fn test_axis_index() {
        let arr = table();
        assert_eq!(arr.axis_index(1usize).unwrap(), 1);
        assert_eq!(arr.axis_index("row").unwrap(), 0);
        assert!(matches!(
            arr.axis_index(2usize),
            Err(LabelledArrayError::AxisOutOfBounds { axis: 2, n_dims: 2 })
        ));
        assert_eq!(arr.axis_index(1).unwrap(), 1);
        assert_eq!(arr.axis_index(-1).unwrap(), 1);
        assert_eq!(arr.axis_index(-2isize).unwrap(), 0);
        assert!(matches!(
            arr.axis_index(-3),
            Err(LabelledArrayError::AxisOutOfBounds { axis: -3, n_dims: 2 })
        ));
        assert!(matches!(
            arr.axis_index(isize::MIN),
            Err(LabelledArrayError::AxisOutOfBounds { .. })
        ));
        assert!(matches!(
            arr.axis_index("depth"),
            Err(LabelledArrayError::AxisNameNotFound { .. })
        ));
    }

    #[test]
    fn test_get_pads_trailing_axes() {
        let arr = table();
        let row = arr.get(&[AxisIndex::at(1)]).unwrap();
        assert_eq!(row.shape(), &[3]);
        assert_eq!(row.iter().copied().collect::<Vec<_>>(), vec![4.0, 5.0, 6.0]);

        let corner = arr.get(&[AxisIndex::at(-1), AxisIndex::at(-1)]).unwrap();
        assert_eq!(corner.ndim(), 0);
        assert_eq!(corner.iter().next(), Some(&6.0));
    }

    #[test]
    fn test_get_arity() {
        let arr = table();
        let key = [AxisIndex::at(0), AxisIndex::at(0), AxisIndex::at(0)];
        assert!(matches!(
            arr.get(&key),
            Err(LabelledArrayError::Arity { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_set_fills_region() {
        let mut arr = table();
        arr.set(&[AxisIndex::full(), AxisIndex::Slice(AxisSlice::range(1, 3))], 0.0)
            .unwrap();
        assert_eq!(
            arr.values().iter().copied().collect::<Vec<_>>(),
            vec![1.0, 0.0, 0.0, 4.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_set_out_of_bounds_leaves_buffer() {
        let mut arr = table();
        let before = arr.clone();
        let err = arr.set(&[AxisIndex::at(2)], 9.0).unwrap_err();
        assert!(matches!(err, LabelledArrayError::IndexOutOfBounds { index: 2, axis: 0, size: 2 }));
        assert_eq!(arr, before);
    }

    #[test]
    fn test_assign_shape_checked() {
        let mut arr = table();
        let block = ArrayD::from_shape_vec(vec![3], vec![7.0, 8.0, 9.0]).unwrap();
        arr.assign(&[AxisIndex::at(0)], &block).unwrap();
        assert_eq!(
            arr.values().iter().copied().collect::<Vec<_>>(),
            vec![7.0, 8.0, 9.0, 4.0, 5.0, 6.0]
        );

        let wrong = ArrayD::from_shape_vec(vec![2], vec![0.0, 0.0]).unwrap();
        assert!(matches!(
            arr.assign(&[AxisIndex::at(0)], &wrong),
            Err(LabelledArrayError::ValueShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_display() {
        let arr = table();
        assert_eq!(
            arr.to_string(),
            r#"LabelledArray(shape=[2, 3], axis_names=["row", "col"])"#
        );
    }
}
