//! Validation schema derived from the catalog
//!
//! Each field's `validation` block becomes a [`FieldValidator`]. Rules run in
//! the fixed order required → minLength → isEmail → pattern and the first
//! failure is the field's only error. Rules other than `required` are skipped
//! for empty values, so an optional field left blank always passes.

use crate::error::ValidationError;
use crate::state::{ErrorMap, FormState};
use dform_catalog::{Catalog, FieldDescriptor, FieldValue, ValidationRules};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const DEFAULT_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Whether `value` looks like an email address
#[inline]
#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Executable rules of one field
#[derive(Debug, Clone)]
pub struct FieldValidator {
    field: String,
    label: String,
    rules: ValidationRules,
    pattern: Option<Regex>,
}

impl FieldValidator {
    /// Build validator for a descriptor
    ///
    /// `pattern` is the catalog's pre-compiled regex for this field.
    #[must_use]
    pub fn new(field: &FieldDescriptor, pattern: Option<Regex>) -> Self {
        Self {
            field: field.name.clone(),
            label: field.display_label(),
            rules: field.rules(),
            pattern,
        }
    }

    /// Field this validator checks
    #[inline]
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Whether the field declares `required`
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.required
    }

    /// Whether any rule is declared
    #[must_use]
    pub fn has_rules(&self) -> bool {
        self.rules.required
            || self.rules.min_length.is_some()
            || self.rules.is_email
            || self.pattern.is_some()
    }

    /// Check a value; `None` counts as empty
    pub fn check(&self, value: Option<&FieldValue>) -> Result<(), ValidationError> {
        let blank = value.map_or(true, FieldValue::is_blank);
        if self.rules.required && blank {
            return Err(ValidationError::Required {
                field: self.field.clone(),
                message: self.message_or(|| format!("{} is required", self.label)),
            });
        }

        let texts = value.map(filled_texts).unwrap_or_default();
        if texts.is_empty() {
            return Ok(());
        }

        if let Some(min) = self.rules.min_length {
            if texts.iter().any(|t| t.chars().count() < min) {
                return Err(ValidationError::MinLength {
                    field: self.field.clone(),
                    min,
                    message: self
                        .message_or(|| format!("{} must be at least {min} characters", self.label)),
                });
            }
        }

        if self.rules.is_email && texts.iter().any(|t| !is_email(t)) {
            return Err(ValidationError::Format {
                field: self.field.clone(),
                message: self.message_or(|| DEFAULT_EMAIL_MESSAGE.to_string()),
            });
        }

        if let Some(pattern) = &self.pattern {
            if texts.iter().any(|t| !pattern.is_match(t)) {
                return Err(ValidationError::Pattern {
                    field: self.field.clone(),
                    message: self
                        .message_or(|| format!("{} is not in the expected format", self.label)),
                });
            }
        }

        Ok(())
    }

    fn message_or(&self, default: impl FnOnce() -> String) -> String {
        self.rules.error_message.clone().unwrap_or_else(default)
    }
}

/// Non-blank strings a value contributes to length/format checks
fn filled_texts(value: &FieldValue) -> Vec<&str> {
    match value {
        FieldValue::Text(s) if !s.trim().is_empty() => vec![s.as_str()],
        FieldValue::List(items) => items
            .iter()
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Validators for every catalog field, in catalog order
///
/// Pure function of the catalog; built once when the engine mounts.
#[derive(Debug, Clone)]
pub struct Schema {
    validators: Vec<FieldValidator>,
}

impl Schema {
    /// Derive schema from catalog
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let validators = catalog
            .iter()
            .map(|field| FieldValidator::new(field, catalog.pattern(&field.name).cloned()))
            .collect::<Vec<_>>();
        tracing::debug!(
            "Schema built: {} of {} fields carry rules",
            validators.iter().filter(|v| v.has_rules()).count(),
            validators.len()
        );
        Self { validators }
    }

    /// Validator of `name`
    #[must_use]
    pub fn validator(&self, name: &str) -> Option<&FieldValidator> {
        self.validators.iter().find(|v| v.field == name)
    }

    /// Validate every field for which `is_visible` holds
    pub fn validate(&self, state: &FormState, is_visible: impl Fn(&str) -> bool) -> ErrorMap {
        let mut errors = ErrorMap::new();
        for validator in self.validators.iter().filter(|v| is_visible(&v.field)) {
            if let Err(error) = validator.check(state.get(&validator.field)) {
                errors.insert(error);
            }
        }
        errors
    }

    /// Number of validators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the schema is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dform_catalog::FieldType;

    fn validator(rules: ValidationRules) -> FieldValidator {
        let field = FieldDescriptor::new("field", "Field", FieldType::Text).with_validation(rules.clone());
        let pattern = rules.pattern.as_deref().map(|p| Regex::new(p).unwrap());
        FieldValidator::new(&field, pattern)
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    #[test]
    fn required_uses_label_by_default() {
        let v = validator(ValidationRules::required());
        let err = v.check(Some(&text("  "))).unwrap_err();
        assert_eq!(err.message(), "Field is required");
        assert!(v.check(None).is_err());
        assert!(v.check(Some(&text("x"))).is_ok());
    }

    #[test]
    fn custom_message_overrides() {
        let v = validator(ValidationRules::required().with_message("Tell us"));
        assert_eq!(v.check(Some(&text(""))).unwrap_err().message(), "Tell us");
    }

    #[test]
    fn min_length_counts_chars() {
        let v = validator(ValidationRules::default().with_min_length(3));
        assert!(matches!(v.check(Some(&text("ab"))), Err(ValidationError::MinLength { min: 3, .. })));
        assert!(v.check(Some(&text("äöü"))).is_ok());
    }

    #[test]
    fn optional_rules_skip_empty_values() {
        let v = validator(ValidationRules::default().with_email().with_min_length(5));
        assert!(v.check(Some(&text(""))).is_ok());
        assert!(v.check(None).is_ok());
    }

    #[test]
    fn email_format() {
        let v = validator(ValidationRules::default().with_email());
        for good in ["a@b.com", "first.last@example.co.uk", "x+y@d.io"] {
            assert!(v.check(Some(&text(good))).is_ok(), "{good}");
        }
        for bad in ["a@b", "a b@c.com", "@b.com", "a@@b.com", "plain"] {
            assert!(
                matches!(v.check(Some(&text(bad))), Err(ValidationError::Format { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn first_failure_wins_in_fixed_order() {
        let v = validator(
            ValidationRules::required()
                .with_min_length(10)
                .with_email()
                .with_pattern("^z"),
        );
        assert_eq!(v.check(Some(&text(""))).unwrap_err().kind(), "required");
        assert_eq!(v.check(Some(&text("a@b"))).unwrap_err().kind(), "minLength");
        assert_eq!(v.check(Some(&text("abcdefghijk"))).unwrap_err().kind(), "isEmail");
        assert_eq!(v.check(Some(&text("abc@def.com"))).unwrap_err().kind(), "pattern");
        assert!(v.check(Some(&text("zbc@def.com"))).is_ok());
    }

    #[test]
    fn pattern_default_message() {
        let v = validator(ValidationRules::default().with_pattern(r"^\d+$"));
        let err = v.check(Some(&text("12a"))).unwrap_err();
        assert_eq!(err.message(), "Field is not in the expected format");
    }

    #[test]
    fn required_checkbox_must_be_checked() {
        let v = validator(ValidationRules::required());
        assert!(v.check(Some(&FieldValue::Bool(false))).is_err());
        assert!(v.check(Some(&FieldValue::Bool(true))).is_ok());
    }

    #[test]
    fn list_entries_checked_individually() {
        let v = validator(ValidationRules::required().with_min_length(2));
        let list = |items: &[&str]| FieldValue::List(items.iter().map(|s| (*s).to_string()).collect());

        assert!(v.check(Some(&list(&[]))).is_err());
        assert_eq!(v.check(Some(&list(&["Ann", ""]))).unwrap_err().kind(), "required");
        assert_eq!(v.check(Some(&list(&["Ann", "B"]))).unwrap_err().kind(), "minLength");
        assert!(v.check(Some(&list(&["Ann", "Bo"]))).is_ok());
    }

    #[test]
    fn schema_skips_invisible_fields() {
        let catalog = Catalog::new(vec![
            FieldDescriptor::new("a", "A", FieldType::Text).with_validation(ValidationRules::required()),
            FieldDescriptor::new("b", "B", FieldType::Text).with_validation(ValidationRules::required()),
        ])
        .unwrap();
        let schema = Schema::build(&catalog);
        let errors = schema.validate(&FormState::new(), |name| name == "a");

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["a"]);
    }
}
