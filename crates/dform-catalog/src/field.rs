//! Field descriptors
//!
//! Serde model of one catalog entry. Keys follow the catalog file's camelCase
//! convention (`hideWhen`, `minLength`, `defaultChecked`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Input control kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text
    Text,
    /// Email address
    Email,
    /// Masked text
    Password,
    /// Telephone number
    Phone,
    /// One of `values`, shown inline
    Radio,
    /// One of `values`, shown as a dropdown
    Select,
    /// Boolean toggle
    Checkbox,
    /// Growable list of text entries
    List,
}

impl FieldType {
    /// Whether the catalog must declare `values` for this type
    #[inline]
    #[must_use]
    pub fn requires_options(self) -> bool {
        matches!(self, Self::Radio | Self::Select)
    }

    /// Whether the field holds a single string typed by the user
    #[inline]
    #[must_use]
    pub fn is_text_like(self) -> bool {
        matches!(self, Self::Text | Self::Email | Self::Password | Self::Phone)
    }

    /// Catalog spelling of the type
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Phone => "phone",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::List => "list",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allowed option of a radio or select field
///
/// The catalog may list options as plain strings or as `{label, value}` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOption {
    /// Label and value are the same string
    Plain(String),
    /// Distinct label and stored value
    Labeled {
        /// Display text
        label: String,
        /// Stored value
        value: String,
    },
}

impl FieldOption {
    /// Value stored in form state when selected
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(v) => v,
            Self::Labeled { value, .. } => value,
        }
    }

    /// Text shown next to the control
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Plain(v) => v,
            Self::Labeled { label, .. } => label,
        }
    }
}

impl From<&str> for FieldOption {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

/// Declared validation rules of a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    /// Value must not be empty
    pub required: bool,
    /// Minimum number of characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Value must look like an email address
    pub is_email: bool,
    /// Regular expression the value must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message overriding every built-in message of this field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidationRules {
    /// Rules with only `required` set
    #[inline]
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// With minimum length
    #[inline]
    #[must_use]
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// With email format check
    #[inline]
    #[must_use]
    pub fn with_email(mut self) -> Self {
        self.is_email = true;
        self
    }

    /// With regex pattern
    #[inline]
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// With custom error message
    #[inline]
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// Scalar literal used by visibility conditions and defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean literal
    Bool(bool),
    /// String literal
    Text(String),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// How a condition compares the referenced field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    /// Referenced value equals the literal
    Equal,
    /// Referenced value differs from the literal (or is absent)
    NotEqual,
}

/// `{name, value}` pair referencing another field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Referenced field name
    pub name: String,
    /// Literal compared against the referenced field
    pub value: Scalar,
}

impl Condition {
    /// Create condition
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One `hideWhen` group; matches when any of its conditions holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityGroup {
    /// Comparison applied to every condition in the group
    pub relation: Relation,
    /// Conditions, OR-ed together
    pub conditions: Vec<Condition>,
}

impl VisibilityGroup {
    /// Group hiding the field while `name == value`
    #[must_use]
    pub fn equal(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            relation: Relation::Equal,
            conditions: vec![Condition::new(name, value)],
        }
    }

    /// Group hiding the field while `name != value`
    #[must_use]
    pub fn not_equal(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            relation: Relation::NotEqual,
            conditions: vec![Condition::new(name, value)],
        }
    }

    /// Add another OR-ed condition
    #[must_use]
    pub fn or(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.conditions.push(Condition::new(name, value));
        self
    }
}

/// One entry of the field catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique name; state key and control id
    pub name: String,
    /// Display text
    pub label: String,
    /// Control kind
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Hint text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Allowed options (radio/select)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<FieldOption>,
    /// Validation rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    /// Visibility groups; hidden if any group matches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide_when: Vec<VisibilityGroup>,
    /// Default for checkbox (bool) or radio (option value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_checked: Option<Scalar>,
}

impl FieldDescriptor {
    /// Create descriptor with no options, rules or conditions
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            placeholder: None,
            values: Vec::new(),
            validation: None,
            hide_when: Vec::new(),
            default_checked: None,
        }
    }

    /// With placeholder
    #[inline]
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// With options
    #[must_use]
    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<FieldOption>,
    {
        self.values = options.into_iter().map(Into::into).collect();
        self
    }

    /// With validation rules
    #[inline]
    #[must_use]
    pub fn with_validation(mut self, rules: ValidationRules) -> Self {
        self.validation = Some(rules);
        self
    }

    /// Add a visibility group
    #[inline]
    #[must_use]
    pub fn hide_when(mut self, group: VisibilityGroup) -> Self {
        self.hide_when.push(group);
        self
    }

    /// With default value
    #[inline]
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Scalar>) -> Self {
        self.default_checked = Some(default.into());
        self
    }

    /// Validation rules, or the empty rule set
    #[must_use]
    pub fn rules(&self) -> ValidationRules {
        self.validation.clone().unwrap_or_default()
    }

    /// Label with any `{n}` entry-number token removed
    #[must_use]
    pub fn display_label(&self) -> String {
        self.label
            .replace("{n}", "")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether `value` is one of the declared options
    #[must_use]
    pub fn has_option(&self, value: &str) -> bool {
        self.values.iter().any(|o| o.value() == value)
    }

    /// Names of fields this descriptor's visibility depends on
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.hide_when
            .iter()
            .flat_map(|g| g.conditions.iter())
            .map(|c| c.name.as_str())
    }
}
