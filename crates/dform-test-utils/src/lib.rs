//! Testing utilities for dform workspace
//!
//! Shared catalog fixtures and helpers.

#![allow(missing_docs)]

use dform_catalog::{
    Catalog, DisplayNames, FieldDescriptor, FieldType, ValidationRules, VisibilityGroup,
};
use std::path::{Path, PathBuf};

/// Personal-information catalog in its on-disk JSON form
pub const PERSONAL_INFO_JSON: &str = r#"[
  { "name": "firstName", "label": "First Name", "type": "text",
    "placeholder": "Enter your first name",
    "validation": { "required": true, "minLength": 2 } },
  { "name": "lastName", "label": "Last Name", "type": "text",
    "placeholder": "Enter your last name",
    "validation": { "required": true } },
  { "name": "email", "label": "Email", "type": "email",
    "placeholder": "Enter your email",
    "validation": { "required": true, "isEmail": true } },
  { "name": "password", "label": "Password", "type": "password",
    "validation": { "required": true, "minLength": 8,
                    "errorMessage": "Password must be at least 8 characters" } },
  { "name": "phone", "label": "Phone Number", "type": "phone",
    "placeholder": "Enter your phone number",
    "validation": { "pattern": "^[0-9]{10}$", "errorMessage": "Phone number must be 10 digits" } },
  { "name": "maritalStatus", "label": "Marital Status", "type": "radio",
    "values": ["Single", "Married"] },
  { "name": "spouseName", "label": "Spouse's Name", "type": "text",
    "placeholder": "Enter your spouse's name",
    "validation": { "required": true },
    "hideWhen": [ { "relation": "notEqual", "conditions": [ { "name": "maritalStatus", "value": "Married" } ] } ] },
  { "name": "children", "label": "Do you have children?", "type": "radio",
    "values": ["Yes", "No"], "defaultChecked": "No",
    "hideWhen": [ { "relation": "notEqual", "conditions": [ { "name": "maritalStatus", "value": "Married" } ] } ] },
  { "name": "childrenNames", "label": "Child {n} Name", "type": "list",
    "placeholder": "Enter name of child {n}",
    "validation": { "required": true },
    "hideWhen": [ { "relation": "notEqual", "conditions": [ { "name": "children", "value": "Yes" } ] } ] },
  { "name": "terms", "label": "I accept the terms", "type": "checkbox",
    "validation": { "required": true, "errorMessage": "You must accept the terms" } }
]"#;

/// Display-name mapping matching [`PERSONAL_INFO_JSON`], minus `childrenNames`
pub const NAME_FIELDS_JSON: &str = r#"{
  "firstName": "First Name",
  "lastName": "Last Name",
  "email": "Email Address",
  "password": "Password",
  "phone": "Phone Number",
  "maritalStatus": "Marital Status",
  "spouseName": "Spouse's Name",
  "children": "Has Children",
  "terms": "Accepted Terms"
}"#;

pub fn personal_info_catalog() -> Catalog {
    Catalog::from_json_str(PERSONAL_INFO_JSON).unwrap()
}

pub fn name_fields() -> DisplayNames {
    DisplayNames::from_json_str(NAME_FIELDS_JSON).unwrap()
}

/// Single required email field
pub fn email_only_catalog() -> Catalog {
    Catalog::new(vec![FieldDescriptor::new("email", "Email", FieldType::Email)
        .with_validation(ValidationRules::required().with_email())])
    .unwrap()
}

/// Marital status gating a required spouse name
pub fn marital_catalog() -> Catalog {
    Catalog::new(vec![
        FieldDescriptor::new("maritalStatus", "Marital Status", FieldType::Radio)
            .with_options(["Single", "Married"]),
        FieldDescriptor::new("spouseName", "Spouse's Name", FieldType::Text)
            .with_validation(ValidationRules::required())
            .hide_when(VisibilityGroup::not_equal("maritalStatus", "Married")),
    ])
    .unwrap()
}

/// Write `contents` to `dir/name` and return the path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
