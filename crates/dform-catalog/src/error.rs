//! Error types for the field catalog
//!
//! Provides error handling for:
//! - Reading catalog files (io, JSON, YAML)
//! - Structural problems found when the catalog is checked at load time

use crate::field::FieldType;
use std::path::PathBuf;

/// Structural problem in a catalog
///
/// Always fatal at load; the engine never mounts a catalog that has one.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// Field has an empty name
    #[error("field #{index} has an empty name")]
    EmptyName { index: usize },

    /// Two fields share a name
    #[error("duplicate field name: '{0}'")]
    DuplicateName(String),

    /// Radio/select declared without options
    #[error("field '{field}' of type {field_type} declares no values")]
    MissingValues { field: String, field_type: FieldType },

    /// Pattern does not compile
    #[error("field '{field}' has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// `defaultChecked` does not fit the field type
    #[error("field '{field}' has an invalid default: {reason}")]
    InvalidDefault { field: String, reason: String },

    /// `hideWhen` group with no conditions
    #[error("field '{field}' has a hideWhen group without conditions")]
    EmptyCondition { field: String },
}

/// Errors while loading a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog structure is invalid
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// IO error reading the catalog file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is neither JSON nor YAML
    #[error("unsupported catalog format: '{0}'")]
    UnsupportedFormat(String),
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error is a structural catalog problem
    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_display() {
        let err = ConfigurationError::MissingValues {
            field: "maritalStatus".to_string(),
            field_type: FieldType::Radio,
        };
        assert_eq!(err.to_string(), "field 'maritalStatus' of type radio declares no values");
    }

    #[test]
    fn error_conversions() {
        let err: CatalogError = ConfigurationError::DuplicateName("email".to_string()).into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("duplicate field name"));
    }
}
