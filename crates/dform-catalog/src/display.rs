//! Display-name mapping
//!
//! Maps field names to the labels shown on read-only pages. A missing entry
//! is not an error; the raw key is shown instead.

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Field name → human-readable label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayNames {
    names: IndexMap<String, String>,
}

impl DisplayNames {
    /// Create empty mapping
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive labels from a catalog
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        catalog
            .iter()
            .map(|f| (f.name.clone(), f.label.clone()))
            .collect()
    }

    /// Parse a JSON object of name → label
    pub fn from_json_str(source: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a JSON mapping file
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        Self::from_json_str(&source)
    }

    /// Add or replace a label
    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.names.insert(key.into(), label.into());
    }

    /// Label for `key`, falling back to the key itself
    #[must_use]
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        match self.names.get(key) {
            Some(label) => label,
            None => {
                tracing::debug!(key, "No display name, using raw key");
                key
            }
        }
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the mapping is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DisplayNames {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, FieldType};

    #[test]
    fn falls_back_to_raw_key() {
        let names = DisplayNames::from_json_str(r#"{"firstName": "First Name"}"#).unwrap();
        assert_eq!(names.label_for("firstName"), "First Name");
        assert_eq!(names.label_for("childrenNames"), "childrenNames");
    }

    #[test]
    fn derives_from_catalog() {
        let catalog = Catalog::new(vec![FieldDescriptor::new("email", "Email Address", FieldType::Email)]).unwrap();
        let names = DisplayNames::from_catalog(&catalog);
        assert_eq!(names.len(), 1);
        assert_eq!(names.label_for("email"), "Email Address");
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(DisplayNames::from_json_str("[1, 2]").is_err());
    }
}
