//! Per-axis label vectors.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use crate::error::{LabelledArrayError, Result};
use crate::options::LabelledArrayOptions;

/// Sentinel returned by [`AxisLabels::get_indexer`] for labels that are not present.
pub const MISSING: isize = -1;

/// Ordered string labels for one axis.
///
/// Lookup by label is a hash lookup. When the same label occurs more than once
/// the first occurrence wins; [`LabelledArray`](crate::LabelledArray) rejects
/// such vectors at construction, so inside an array every label is unique.
#[derive(Clone, Default)]
pub struct AxisLabels {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl AxisLabels {
    /// Create a label vector from anything that yields strings.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(labels.len());
        for (pos, label) in labels.iter().enumerate() {
            positions.entry(label.clone()).or_insert(pos);
        }
        Self { labels, positions }
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in axis order.
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Iterate over the labels in axis order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Label at `pos`, if any.
    pub fn get(&self, pos: usize) -> Option<&str> {
        self.labels.get(pos).map(String::as_str)
    }

    /// Position of the first label equal to `label`.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Whether `label` is present.
    pub fn contains(&self, label: &str) -> bool {
        self.positions.contains_key(label)
    }

    /// Positions of each of `keys`, with [`MISSING`] for absent keys.
    ///
    /// # Example
    /// ```
    /// use labelled_array::{AxisLabels, MISSING};
    ///
    /// let labels = AxisLabels::from(["x", "y", "z"]);
    /// assert_eq!(labels.get_indexer(&["z", "q", "x"]), vec![2, MISSING, 0]);
    /// ```
    pub fn get_indexer<S: AsRef<str>>(&self, keys: &[S]) -> Vec<isize> {
        keys.iter()
            .map(|key| match self.position(key.as_ref()) {
                Some(pos) => pos as isize,
                None => MISSING,
            })
            .collect()
    }

    /// Sub-vector made of the labels at `positions`, in the given order.
    ///
    /// # Panics
    /// Panics if any position is out of range.
    pub fn take<I>(&self, positions: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self::new(positions.into_iter().map(|pos| self.labels[pos].clone()))
    }

    /// Check the labels of axis `axis` for duplicates and rejected values.
    pub(crate) fn validate(&self, axis: usize, options: &LabelledArrayOptions) -> Result<()> {
        if !options.allow_empty_labels {
            if let Some(position) = self.labels.iter().position(String::is_empty) {
                return Err(LabelledArrayError::InvalidLabel {
                    axis,
                    position,
                    message: "labels must be non-empty strings".to_string(),
                });
            }
        }

        if self.positions.len() != self.labels.len() {
            for (pos, label) in self.labels.iter().enumerate() {
                let first_pos = self.positions[label];
                if first_pos != pos {
                    return Err(LabelledArrayError::DuplicateLabel {
                        label: label.clone(),
                        axis,
                        first_pos,
                        duplicate_pos: pos,
                    });
                }
            }
        }
        Ok(())
    }
}

impl PartialEq for AxisLabels {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for AxisLabels {}

impl fmt::Debug for AxisLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.labels.iter()).finish()
    }
}

impl Index<usize> for AxisLabels {
    type Output = str;

    fn index(&self, pos: usize) -> &str {
        &self.labels[pos]
    }
}

impl<S: Into<String>> FromIterator<S> for AxisLabels {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<String>> for AxisLabels {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<Vec<&str>> for AxisLabels {
    fn from(labels: Vec<&str>) -> Self {
        Self::new(labels)
    }
}

impl From<&[&str]> for AxisLabels {
    fn from(labels: &[&str]) -> Self {
        Self::new(labels.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for AxisLabels {
    fn from(labels: [&str; N]) -> Self {
        Self::new(labels)
    }
}

impl<'a> IntoIterator for &'a AxisLabels {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}
