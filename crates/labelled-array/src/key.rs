//! Keys for positional and label-based indexing.
//!
//! Slices follow Python semantics: bounds are optional, negative bounds count
//! from the end of the axis, out-of-range bounds are clamped, and a negative
//! step walks the axis backwards. [`ResolvedSlice`] is the clamped form, which
//! converts directly into an `ndarray` slice element.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use ndarray::SliceInfoElem;

use crate::error::{LabelledArrayError, Result};

/// A slice of one axis: `start:stop:step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisSlice {
    /// First position; `None` starts at the beginning (or the end for a negative step).
    pub start: Option<isize>,
    /// Exclusive end; `None` runs to the end of the axis in the step direction.
    pub stop: Option<isize>,
    /// Non-zero stride.
    pub step: isize,
}

impl Default for AxisSlice {
    fn default() -> Self {
        Self::full()
    }
}

impl AxisSlice {
    /// Create a slice from optional bounds and a step.
    pub fn new(start: Option<isize>, stop: Option<isize>, step: isize) -> Self {
        Self { start, stop, step }
    }

    /// The whole axis (`:`).
    pub fn full() -> Self {
        Self::new(None, None, 1)
    }

    /// `start:stop` with unit step.
    pub fn range(start: isize, stop: isize) -> Self {
        Self::new(Some(start), Some(stop), 1)
    }

    /// Same bounds with a different step.
    pub fn with_step(mut self, step: isize) -> Self {
        self.step = step;
        self
    }

    /// Clamp this slice against an axis of length `len`.
    ///
    /// `axis` is only used for error reporting.
    pub fn resolve(&self, len: usize, axis: usize) -> Result<ResolvedSlice> {
        let step = self.step;
        if step == 0 {
            return Err(LabelledArrayError::InvalidKeyType {
                axis,
                message: "slice step cannot be zero".to_string(),
            });
        }

        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: isize| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = match self.start {
            Some(bound) => clamp(bound),
            None if step < 0 => upper,
            None => lower,
        };
        let stop = match self.stop {
            Some(bound) => clamp(bound),
            None if step < 0 => lower,
            None => upper,
        };

        // Bounds are clamped to [-1, len], so the span never overflows.
        let span = if step > 0 { stop - start } else { start - stop };
        let count = if span > 0 {
            (span - 1) as usize / step.unsigned_abs() + 1
        } else {
            0
        };

        Ok(ResolvedSlice {
            start,
            step,
            len: count,
        })
    }
}

/// A slice clamped to a concrete axis length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlice {
    start: isize,
    step: isize,
    len: usize,
}

impl ResolvedSlice {
    /// Number of positions selected.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no position is selected.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Selected positions in output order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(move |i| (self.start + i as isize * self.step) as usize)
    }

    /// Equivalent `ndarray` slice element.
    ///
    /// `ndarray` applies a negative step from the end of the range, so the
    /// range is expressed as `[last, first]` in that case.
    pub fn to_slice_elem(&self) -> SliceInfoElem {
        match self.len {
            0 => {
                return SliceInfoElem::Slice {
                    start: 0,
                    end: Some(0),
                    step: 1,
                }
            }
            1 => {
                return SliceInfoElem::Slice {
                    start: self.start,
                    end: Some(self.start + 1),
                    step: 1,
                }
            }
            _ => {}
        }
        let last = self.start + (self.len as isize - 1) * self.step;
        if self.step > 0 {
            SliceInfoElem::Slice {
                start: self.start,
                end: Some(last + 1),
                step: self.step,
            }
        } else {
            SliceInfoElem::Slice {
                start: last,
                end: Some(self.start + 1),
                step: self.step,
            }
        }
    }
}

impl From<RangeFull> for AxisSlice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

impl From<Range<isize>> for AxisSlice {
    fn from(r: Range<isize>) -> Self {
        Self::new(Some(r.start), Some(r.end), 1)
    }
}

impl From<RangeFrom<isize>> for AxisSlice {
    fn from(r: RangeFrom<isize>) -> Self {
        Self::new(Some(r.start), None, 1)
    }
}

impl From<RangeTo<isize>> for AxisSlice {
    fn from(r: RangeTo<isize>) -> Self {
        Self::new(None, Some(r.end), 1)
    }
}

fn inclusive_stop(end: isize) -> Option<isize> {
    // -1 is the last element; one past it is the end of the axis.
    match end {
        -1 => None,
        end => end.checked_add(1),
    }
}

impl From<RangeInclusive<isize>> for AxisSlice {
    fn from(r: RangeInclusive<isize>) -> Self {
        Self::new(Some(*r.start()), inclusive_stop(*r.end()), 1)
    }
}

impl From<RangeToInclusive<isize>> for AxisSlice {
    fn from(r: RangeToInclusive<isize>) -> Self {
        Self::new(None, inclusive_stop(r.end), 1)
    }
}

/// One element of a positional key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisIndex {
    /// A single position; negative values count from the end. Removes the axis.
    Index(isize),
    /// A slice of positions. Keeps the axis.
    Slice(AxisSlice),
}

impl AxisIndex {
    /// A single position.
    pub fn at(index: isize) -> Self {
        Self::Index(index)
    }

    /// The whole axis.
    pub fn full() -> Self {
        Self::Slice(AxisSlice::full())
    }

    pub(crate) fn resolve(&self, len: usize, axis: usize) -> Result<ResolvedIndex> {
        match self {
            AxisIndex::Index(index) => {
                let pos = if *index < 0 {
                    *index + len as isize
                } else {
                    *index
                };
                if pos < 0 || pos >= len as isize {
                    return Err(LabelledArrayError::IndexOutOfBounds {
                        index: *index,
                        axis,
                        size: len,
                    });
                }
                Ok(ResolvedIndex::Index(pos as usize))
            }
            AxisIndex::Slice(slice) => Ok(ResolvedIndex::Slice(slice.resolve(len, axis)?)),
        }
    }
}

impl From<isize> for AxisIndex {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

/// A positional key element after bounds checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResolvedIndex {
    Index(usize),
    Slice(ResolvedSlice),
}

impl ResolvedIndex {
    pub(crate) fn to_slice_elem(self) -> SliceInfoElem {
        match self {
            ResolvedIndex::Index(pos) => SliceInfoElem::Index(pos as isize),
            ResolvedIndex::Slice(slice) => slice.to_slice_elem(),
        }
    }
}

/// One element of a [`sel`](crate::LabelledArray::sel) key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    /// Positional slice; the axis is retained and relabelled.
    Slice(AxisSlice),
    /// A single label; the axis is collapsed.
    Label(String),
    /// Several labels on one axis. Not supported: always rejected with
    /// [`LabelledArrayError::InvalidKeyType`].
    Labels(Vec<String>),
}

impl SelectionKey {
    /// The whole axis.
    pub fn full() -> Self {
        Self::Slice(AxisSlice::full())
    }

    /// A single label.
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }
}

impl From<&str> for SelectionKey {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for SelectionKey {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl From<&String> for SelectionKey {
    fn from(label: &String) -> Self {
        Self::Label(label.clone())
    }
}

impl From<Vec<String>> for SelectionKey {
    fn from(labels: Vec<String>) -> Self {
        Self::Labels(labels)
    }
}

impl From<Vec<&str>> for SelectionKey {
    fn from(labels: Vec<&str>) -> Self {
        Self::Labels(labels.into_iter().map(str::to_string).collect())
    }
}

macro_rules! impl_from_slice_like {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for AxisIndex {
                fn from(slice: $ty) -> Self {
                    Self::Slice(AxisSlice::from(slice))
                }
            }

            impl From<$ty> for SelectionKey {
                fn from(slice: $ty) -> Self {
                    Self::Slice(AxisSlice::from(slice))
                }
            }

            impl IntoSelectionKeys for $ty {
                fn into_selection_keys(self) -> Vec<SelectionKey> {
                    vec![SelectionKey::from(self)]
                }
            }
        )+
    };
}

impl From<AxisSlice> for AxisIndex {
    fn from(slice: AxisSlice) -> Self {
        Self::Slice(slice)
    }
}

impl From<AxisSlice> for SelectionKey {
    fn from(slice: AxisSlice) -> Self {
        Self::Slice(slice)
    }
}

impl_from_slice_like!(
    RangeFull,
    Range<isize>,
    RangeFrom<isize>,
    RangeTo<isize>,
    RangeInclusive<isize>,
    RangeToInclusive<isize>,
);

/// Conversion of a bare key or a key sequence into one key per axis.
///
/// A bare key is treated as a one-element key.
pub trait IntoSelectionKeys {
    fn into_selection_keys(self) -> Vec<SelectionKey>;
}

impl IntoSelectionKeys for SelectionKey {
    fn into_selection_keys(self) -> Vec<SelectionKey> {
        vec![self]
    }
}

impl IntoSelectionKeys for &str {
    fn into_selection_keys(self) -> Vec<SelectionKey> {
        vec![SelectionKey::from(self)]
    }
}

impl IntoSelectionKeys for String {
    fn into_selection_keys(self) -> Vec<SelectionKey> {
        vec![SelectionKey::from(self)]
    }
}

impl IntoSelectionKeys for AxisSlice {
    fn into_selection_keys(self) -> Vec<SelectionKey> {
        vec![SelectionKey::Slice(self)]
    }
}

impl IntoSelectionKeys for Vec<SelectionKey> {
    fn into_selection_keys(self) -> Vec<SelectionKey> {
        self
    }
}

impl IntoSelectionKeys for &[SelectionKey] {
    fn into_selection_keys(self) -> Vec<SelectionKey> {
        self.to_vec()
    }
}

impl<const N: usize> IntoSelectionKeys for [SelectionKey; N] {
    fn into_selection_keys(self) -> Vec<SelectionKey> {
        self.into()
    }
}

/// Build and apply a [`sel`](crate::LabelledArray::sel) key from labels and ranges.
///
/// ```
/// use labelled_array::{sel, LabelledArray, Selection};
/// use ndarray::ArrayD;
///
/// let values = ArrayD::from_shape_vec(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let arr = LabelledArray::new(values, vec![vec!["a", "b"], vec!["x", "y", "z"]], None).unwrap();
///
/// let row = sel!(arr; "b", ..).unwrap();
/// let Selection::Vector(row) = row else { panic!("expected a vector") };
/// assert_eq!(row.values.to_vec(), vec![4.0, 5.0, 6.0]);
/// ```
#[macro_export]
macro_rules! sel {
    ($array:expr; $($key:expr),+ $(,)?) => {
        $array.sel(vec![$($crate::SelectionKey::from($key)),+])
    };
}
