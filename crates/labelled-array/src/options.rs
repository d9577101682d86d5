//! Configuration options for building labelled arrays.

/// Prefix used for generated axis names (`axis_0`, `axis_1`, ...).
pub const DEFAULT_AXIS_NAME_PREFIX: &str = "axis_";

/// Options controlling how a [`LabelledArray`](crate::LabelledArray) is
/// validated and named at construction.
///
/// # Example
///
/// ```
/// use labelled_array::LabelledArrayOptions;
///
/// let opts = LabelledArrayOptions::default()
///     .with_axis_name_prefix("dim_")
///     .with_allow_empty_labels(true);
///
/// assert_eq!(opts.default_axis_name(2), "dim_2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledArrayOptions {
    /// Prefix for axis names generated when none are supplied.
    pub axis_name_prefix: String,

    /// Accept the empty string as a label.
    pub allow_empty_labels: bool,
}

impl Default for LabelledArrayOptions {
    fn default() -> Self {
        Self {
            axis_name_prefix: DEFAULT_AXIS_NAME_PREFIX.to_string(),
            allow_empty_labels: false,
        }
    }
}

impl LabelledArrayOptions {
    /// Set the prefix for generated axis names.
    pub fn with_axis_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.axis_name_prefix = prefix.into();
        self
    }

    /// Allow or reject empty-string labels.
    pub fn with_allow_empty_labels(mut self, allow: bool) -> Self {
        self.allow_empty_labels = allow;
        self
    }

    /// Name given to axis `axis` when the caller does not name it.
    pub fn default_axis_name(&self, axis: usize) -> String {
        format!("{}{}", self.axis_name_prefix, axis)
    }

    /// Generated names for an array with `n_dims` axes.
    pub fn default_axis_names(&self, n_dims: usize) -> Vec<String> {
        (0..n_dims).map(|axis| self.default_axis_name(axis)).collect()
    }
}
