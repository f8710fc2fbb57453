//! Validated field catalog
//!
//! A catalog is checked once when it is built and is read-only afterwards.
//! Regex patterns are compiled here so later stages never see a bad pattern.

use crate::error::{CatalogError, CatalogResult, ConfigurationError};
use crate::field::{FieldDescriptor, FieldType, Scalar};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// On-disk catalog format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// JSON array of descriptors
    Json,
    /// YAML sequence of descriptors
    Yaml,
}

impl CatalogFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Ordered, validated collection of field descriptors
#[derive(Debug, Clone)]
pub struct Catalog {
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
    patterns: HashMap<String, Regex>,
}

impl Catalog {
    /// Build catalog, checking its structure
    ///
    /// # Errors
    /// The first [`ConfigurationError`] found, in declaration order.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, ConfigurationError> {
        let mut index = HashMap::with_capacity(fields.len());
        let mut patterns = HashMap::new();

        for (i, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(ConfigurationError::EmptyName { index: i });
            }
            if index.insert(field.name.clone(), i).is_some() {
                return Err(ConfigurationError::DuplicateName(field.name.clone()));
            }
            if field.field_type.requires_options() && field.values.is_empty() {
                return Err(ConfigurationError::MissingValues {
                    field: field.name.clone(),
                    field_type: field.field_type,
                });
            }
            check_default(field)?;
            if field.hide_when.iter().any(|g| g.conditions.is_empty()) {
                return Err(ConfigurationError::EmptyCondition {
                    field: field.name.clone(),
                });
            }
            if let Some(pattern) = field.validation.as_ref().and_then(|v| v.pattern.as_deref()) {
                let regex = Regex::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
                    field: field.name.clone(),
                    source,
                })?;
                patterns.insert(field.name.clone(), regex);
            }
        }

        let known: HashSet<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        for field in &fields {
            for dep in field.dependencies() {
                if !known.contains(dep) {
                    tracing::warn!(
                        field = %field.name,
                        reference = dep,
                        "hideWhen references a field that is not in the catalog"
                    );
                }
            }
        }

        tracing::debug!("Catalog built with {} fields", fields.len());

        Ok(Self {
            fields,
            index,
            patterns,
        })
    }

    /// Parse a JSON array of descriptors
    pub fn from_json_str(source: &str) -> CatalogResult<Self> {
        let fields: Vec<FieldDescriptor> = serde_json::from_str(source)?;
        Ok(Self::new(fields)?)
    }

    /// Parse a YAML sequence of descriptors
    pub fn from_yaml_str(source: &str) -> CatalogResult<Self> {
        let fields: Vec<FieldDescriptor> = serde_yaml::from_str(source)?;
        Ok(Self::new(fields)?)
    }

    /// Load catalog file; format chosen by extension
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path)?;
        let source =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        tracing::info!("Loading catalog from {}", path.display());
        match format {
            CatalogFormat::Json => Self::from_json_str(&source),
            CatalogFormat::Yaml => Self::from_yaml_str(&source),
        }
    }

    /// Look up a field by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Whether the catalog declares `name`
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of `name` in declaration order
    #[inline]
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Compiled pattern of a field, if it declares one
    #[inline]
    #[must_use]
    pub fn pattern(&self, name: &str) -> Option<&Regex> {
        self.patterns.get(name)
    }

    /// Fields in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Descriptors as a slice
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_default(field: &FieldDescriptor) -> Result<(), ConfigurationError> {
    let Some(default) = &field.default_checked else {
        return Ok(());
    };
    let invalid = |reason: String| ConfigurationError::InvalidDefault {
        field: field.name.clone(),
        reason,
    };

    match (field.field_type, default) {
        (FieldType::Checkbox, Scalar::Bool(_)) => Ok(()),
        (FieldType::Checkbox, Scalar::Text(_)) => {
            Err(invalid("checkbox default must be a boolean".to_string()))
        }
        (FieldType::Radio, Scalar::Text(value)) if field.has_option(value) => Ok(()),
        (FieldType::Radio, other) => Err(invalid(format!("'{other}' is not one of the options"))),
        (field_type, _) => Err(invalid(format!("{field_type} fields take no default"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ValidationRules, VisibilityGroup};
    use pretty_assertions::assert_eq;

    fn marital() -> FieldDescriptor {
        FieldDescriptor::new("maritalStatus", "Marital Status", FieldType::Radio)
            .with_options(["Single", "Married"])
    }

    #[test]
    fn builds_and_indexes_in_order() {
        let catalog = Catalog::new(vec![
            FieldDescriptor::new("firstName", "First Name", FieldType::Text),
            marital(),
            FieldDescriptor::new("spouseName", "Spouse's Name", FieldType::Text)
                .hide_when(VisibilityGroup::not_equal("maritalStatus", "Married")),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.position("spouseName"), Some(2));
        assert_eq!(
            catalog.field_names().collect::<Vec<_>>(),
            vec!["firstName", "maritalStatus", "spouseName"]
        );
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn rejects_blank_name_with_its_position() {
        let err = Catalog::new(vec![
            FieldDescriptor::new("email", "Email", FieldType::Email),
            FieldDescriptor::new("  ", "Nameless", FieldType::Text),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyName { index: 1 }));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Catalog::new(vec![
            FieldDescriptor::new("email", "Email", FieldType::Email),
            FieldDescriptor::new("email", "Email again", FieldType::Email),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateName(ref n) if n == "email"));
    }

    #[test]
    fn rejects_radio_without_values() {
        let err = Catalog::new(vec![FieldDescriptor::new("children", "Children?", FieldType::Radio)])
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingValues { .. }));
    }

    #[test]
    fn rejects_select_without_values() {
        let err = Catalog::new(vec![FieldDescriptor::new("country", "Country", FieldType::Select)])
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingValues { field_type: FieldType::Select, .. }));
    }

    #[test]
    fn rejects_bad_pattern() {
        let err = Catalog::new(vec![FieldDescriptor::new("phone", "Phone", FieldType::Phone)
            .with_validation(ValidationRules::default().with_pattern("[0-9"))])
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
    }

    #[test]
    fn compiles_patterns_once() {
        let catalog = Catalog::new(vec![FieldDescriptor::new("phone", "Phone", FieldType::Phone)
            .with_validation(ValidationRules::default().with_pattern(r"^\d{10}$"))])
        .unwrap();
        assert!(catalog.pattern("phone").unwrap().is_match("0123456789"));
        assert!(catalog.pattern("missing").is_none());
    }

    #[test]
    fn checks_defaults_against_type() {
        assert!(Catalog::new(vec![marital().with_default("Married")]).is_ok());
        assert!(matches!(
            Catalog::new(vec![marital().with_default("Divorced")]),
            Err(ConfigurationError::InvalidDefault { .. })
        ));
        assert!(matches!(
            Catalog::new(vec![FieldDescriptor::new("agree", "Agree", FieldType::Checkbox).with_default("yes")]),
            Err(ConfigurationError::InvalidDefault { .. })
        ));
        assert!(matches!(
            Catalog::new(vec![FieldDescriptor::new("kids", "Kids", FieldType::List).with_default(true)]),
            Err(ConfigurationError::InvalidDefault { .. })
        ));
    }

    #[test]
    fn rejects_empty_condition_group() {
        let mut field = FieldDescriptor::new("spouseName", "Spouse", FieldType::Text)
            .hide_when(VisibilityGroup::equal("maritalStatus", "Single"));
        field.hide_when[0].conditions.clear();
        assert!(matches!(
            Catalog::new(vec![field]),
            Err(ConfigurationError::EmptyCondition { .. })
        ));
    }

    #[test]
    fn tolerates_unknown_reference() {
        let catalog = Catalog::new(vec![FieldDescriptor::new("spouseName", "Spouse", FieldType::Text)
            .hide_when(VisibilityGroup::not_equal("maritalStatus", "Married"))]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn parses_yaml() {
        let yaml = r"
- name: email
  label: Email
  type: email
  validation:
    required: true
    isEmail: true
";
        let catalog = Catalog::from_yaml_str(yaml).unwrap();
        assert!(catalog.get("email").unwrap().rules().is_email);
    }

    #[test]
    fn load_detects_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formFields.json");
        std::fs::write(&path, r#"[{"name":"firstName","label":"First Name","type":"text"}]"#).unwrap();
        assert_eq!(Catalog::load(&path).unwrap().len(), 1);

        let bad = dir.path().join("formFields.txt");
        std::fs::write(&bad, "").unwrap();
        assert!(matches!(Catalog::load(&bad), Err(CatalogError::UnsupportedFormat(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Catalog::load("/nonexistent/formFields.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
