//! Live form state and error map

use crate::error::ValidationError;
use dform_catalog::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Flat record handed to the confirmation page
pub type Submission = IndexMap<String, FieldValue>;

/// Field name → current value
///
/// Owned by one engine instance; only the engine mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    values: IndexMap<String, FieldValue>,
}

impl FormState {
    /// Create empty state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `name`
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Whether `name` has a value
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.shift_remove(name)
    }

    /// Reorder entries by `position`, stable for equal keys
    pub(crate) fn sort_by_position(&mut self, position: impl Fn(&str) -> usize) {
        self.values.sort_by(|a, _, b, _| position(a).cmp(&position(b)));
    }

    /// Entries in insertion order
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldValue> {
        self.values.iter()
    }

    /// Number of fields with a value
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field has a value
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Field name → validation error, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: IndexMap<String, ValidationError>,
}

impl ErrorMap {
    /// Create empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, error: ValidationError) {
        self.errors.insert(error.field().to_string(), error);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<ValidationError> {
        self.errors.shift_remove(name)
    }

    /// Error of `name`
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValidationError> {
        self.errors.get(name)
    }

    /// Message of `name`
    #[inline]
    #[must_use]
    pub fn message(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(ValidationError::message)
    }

    /// Whether `name` has an error
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.errors.contains_key(name)
    }

    /// Errors in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values()
    }

    /// Names of fields with an error
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Field name → message pairs
    #[must_use]
    pub fn messages(&self) -> IndexMap<String, String> {
        self.errors
            .iter()
            .map(|(k, e)| (k.clone(), e.message().to_string()))
            .collect()
    }

    /// Number of errors
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether there are no errors
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_keeps_insertion_order_after_removal() {
        let mut state = FormState::new();
        state.insert("a", FieldValue::from("1"));
        state.insert("b", FieldValue::from("2"));
        state.insert("c", FieldValue::from("3"));
        state.remove("b");

        let keys: Vec<_> = state.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn error_map_one_entry_per_field() {
        let mut errors = ErrorMap::new();
        errors.insert(ValidationError::Required {
            field: "email".to_string(),
            message: "Email is required".to_string(),
        });
        errors.insert(ValidationError::Format {
            field: "email".to_string(),
            message: "bad".to_string(),
        });

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message("email"), Some("bad"));
        assert!(errors.remove("email").is_some());
        assert!(errors.is_empty());
    }
}
