//! Field values held in form state

use crate::field::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current value of one field
///
/// Serialized untagged so a handed-off record reads as plain JSON:
/// strings, booleans and arrays of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state
    Bool(bool),
    /// Text, radio and select value
    Text(String),
    /// Dynamic list entries
    List(Vec<String>),
}

impl FieldValue {
    /// Empty text value
    #[inline]
    #[must_use]
    pub fn empty_text() -> Self {
        Self::Text(String::new())
    }

    /// Whether the value counts as "not filled in"
    ///
    /// Blank text (after trimming), `false`, an empty list, or a list with
    /// any blank entry.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(b) => !b,
            Self::List(items) => items.is_empty() || items.iter().any(|s| s.trim().is_empty()),
        }
    }

    /// Text content, if this is a text value
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean content, if this is a checkbox value
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// List entries, if this is a list value
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Compare against a condition literal
    ///
    /// Text compares with text and bool with bool; a bool also matches the
    /// literal strings `"true"` / `"false"`. Lists never match.
    #[must_use]
    pub fn matches(&self, expected: &Scalar) -> bool {
        match (self, expected) {
            (Self::Text(a), Scalar::Text(b)) => a == b,
            (Self::Bool(a), Scalar::Bool(b)) => a == b,
            (Self::Bool(a), Scalar::Text(b)) => b == bool_str(*a),
            (Self::Text(a), Scalar::Bool(b)) => a == bool_str(*b),
            (Self::List(_), _) => false,
        }
    }

    /// Short name of the variant, for error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Text(_) => "text",
            Self::List(_) => "list",
        }
    }
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("Yes"),
            Self::Bool(false) => f.write_str("No"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(!FieldValue::from("x").is_blank());
        assert!(FieldValue::from(false).is_blank());
        assert!(FieldValue::List(vec![]).is_blank());
        assert!(FieldValue::List(vec!["Ann".into(), String::new()]).is_blank());
        assert!(!FieldValue::List(vec!["Ann".into()]).is_blank());
    }

    #[test]
    fn matches_across_scalar_kinds() {
        assert!(FieldValue::from("Married").matches(&Scalar::from("Married")));
        assert!(!FieldValue::from("Single").matches(&Scalar::from("Married")));
        assert!(FieldValue::from(true).matches(&Scalar::Bool(true)));
        assert!(FieldValue::from(true).matches(&Scalar::from("true")));
        assert!(FieldValue::from("false").matches(&Scalar::Bool(false)));
        assert!(!FieldValue::List(vec!["true".into()]).matches(&Scalar::Bool(true)));
    }

    #[test]
    fn untagged_json_shape() {
        let v: FieldValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(v, FieldValue::List(vec!["a".into(), "b".into()]));
        assert_eq!(serde_json::to_string(&FieldValue::Bool(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&FieldValue::from("x")).unwrap(), "\"x\"");
    }

    #[test]
    fn display_for_confirmation() {
        assert_eq!(FieldValue::Bool(false).to_string(), "No");
        assert_eq!(FieldValue::List(vec!["Ann".into(), "Bo".into()]).to_string(), "Ann, Bo");
    }
}
