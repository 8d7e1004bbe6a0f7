//! Per-field form validation results.

use std::collections::BTreeMap;
use std::fmt;

/// Messages for the fields of a form that failed validation, keyed by a
/// field enum `F`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors<F>(BTreeMap<F, &'static str>);

impl<F: Ord + Copy> ValidationErrors<F> {
    /// Message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: F) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Iterate over failed fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (F, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record a failure. The first message for a field wins.
    pub(crate) fn insert(&mut self, field: F, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    /// `Ok(())` when nothing failed.
    pub(crate) fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl<F> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<F> fmt::Display for ValidationErrors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.0.len())
    }
}

impl<F: fmt::Debug> std::error::Error for ValidationErrors<F> {}
