//! Error types for the form engine
//!
//! Two families live here:
//! - [`ValidationError`]: per-field user-input problems. These are data, kept
//!   in an `ErrorMap` and shown next to the control; they never abort anything.
//! - [`EngineError`] / [`StoreError`]: misuse of the engine API and hand-off
//!   store failures, returned as `Err`.

use crate::lifecycle::FormPhase;
use dform_catalog::FieldType;
use std::path::PathBuf;

/// Per-field validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required value is empty
    #[error("{message}")]
    Required { field: String, message: String },

    /// Value shorter than `minLength`
    #[error("{message}")]
    MinLength {
        field: String,
        min: usize,
        message: String,
    },

    /// Value is not an email address
    #[error("{message}")]
    Format { field: String, message: String },

    /// Value does not match the declared pattern
    #[error("{message}")]
    Pattern { field: String, message: String },
}

impl ValidationError {
    /// Name of the offending field
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field, .. }
            | Self::MinLength { field, .. }
            | Self::Format { field, .. }
            | Self::Pattern { field, .. } => field,
        }
    }

    /// Human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message, .. }
            | Self::MinLength { message, .. }
            | Self::Format { message, .. }
            | Self::Pattern { message, .. } => message,
        }
    }

    /// Short rule name
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::MinLength { .. } => "minLength",
            Self::Format { .. } => "isEmail",
            Self::Pattern { .. } => "pattern",
        }
    }
}

/// Hand-off store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error on the backing file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored document could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from engine operations
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Field is not in the catalog
    #[error("unknown field: '{0}'")]
    UnknownField(String),

    /// Field is currently hidden and cannot be edited
    #[error("field '{0}' is hidden")]
    FieldHidden(String),

    /// Value shape does not fit the field type
    #[error("field '{field}' of type {field_type} cannot hold a {found} value")]
    TypeMismatch {
        field: String,
        field_type: FieldType,
        found: &'static str,
    },

    /// Value is not one of the declared options
    #[error("'{value}' is not an option of field '{field}'")]
    InvalidOption { field: String, value: String },

    /// List index past the end
    #[error("index {index} out of bounds for list '{field}' of length {len}")]
    IndexOutOfBounds {
        field: String,
        index: usize,
        len: usize,
    },

    /// Lifecycle does not allow the operation
    #[error("illegal transition: {from:?} -> {to:?}")]
    IllegalTransition { from: FormPhase, to: FormPhase },

    /// Hand-off store failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Whether the caller can retry after correcting its input
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::IllegalTransition { from: FormPhase::Submitted, .. })
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_accessors() {
        let err = ValidationError::Format {
            field: "email".to_string(),
            message: "Please enter a valid email address".to_string(),
        };
        assert_eq!(err.field(), "email");
        assert_eq!(err.kind(), "isEmail");
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }

    #[test]
    fn engine_error_display() {
        let err = EngineError::IndexOutOfBounds {
            field: "childrenNames".to_string(),
            index: 3,
            len: 1,
        };
        assert_eq!(
            err.to_string(),
            "index 3 out of bounds for list 'childrenNames' of length 1"
        );
    }

    #[test]
    fn submitted_forms_are_not_recoverable() {
        let err = EngineError::IllegalTransition {
            from: FormPhase::Submitted,
            to: FormPhase::Editing,
        };
        assert!(!err.is_recoverable());
        assert!(EngineError::UnknownField("x".to_string()).is_recoverable());
    }

    #[test]
    fn store_error_conversion() {
        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        let err: EngineError = StoreError::from(json_err).into();
        assert!(matches!(err, EngineError::Store(StoreError::Serialization(_))));
    }
}
