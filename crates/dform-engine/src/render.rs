//! Render model
//!
//! Framework-neutral description of what to draw for each visible field. A UI
//! layer maps [`Control`] variants onto its own widgets; the `Display` impls
//! give a plain-text rendering.

use dform_catalog::{FieldDescriptor, FieldOption, FieldType, FieldValue};
use serde::Serialize;
use std::fmt;

/// `{n}` in list labels and placeholders is replaced by the entry number
pub const ENTRY_NUMBER: &str = "{n}";

/// HTML-style input kind of a text control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Plain text
    Text,
    /// Email
    Email,
    /// Masked
    Password,
    /// Telephone
    Tel,
}

impl InputType {
    fn for_field(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Email => Self::Email,
            FieldType::Password => Self::Password,
            FieldType::Phone => Self::Tel,
            _ => Self::Text,
        }
    }

    /// Input type attribute
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Tel => "tel",
        }
    }
}

/// Selectable option of a radio group or select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// Display text
    pub label: String,
    /// Stored value
    pub value: String,
    /// Currently selected
    pub selected: bool,
}

/// One entry of a dynamic list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    /// Zero-based position
    pub index: usize,
    /// Numbered label ("Child 2 Name")
    pub label: String,
    /// Numbered placeholder
    pub placeholder: Option<String>,
    /// Current text
    pub value: String,
}

/// Control to draw for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "camelCase")]
pub enum Control {
    /// Single-line input
    TextInput {
        input_type: InputType,
        placeholder: Option<String>,
        value: String,
    },
    /// Inline radio buttons
    RadioGroup { options: Vec<Choice> },
    /// Dropdown
    Select {
        options: Vec<Choice>,
        placeholder: Option<String>,
    },
    /// Toggle
    Checkbox { checked: bool },
    /// Entries with remove buttons and an "add another" button
    DynamicList { entries: Vec<ListEntry> },
}

/// Render model of one visible field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedField {
    /// Control id (the field name)
    pub id: String,
    /// Display label
    pub label: String,
    /// Whether the field declares `required`
    pub required: bool,
    /// Current validation message
    pub error: Option<String>,
    /// Control to draw
    pub control: Control,
}

impl RenderedField {
    /// Build render model for `field` with its current value and error
    #[must_use]
    pub fn build(field: &FieldDescriptor, value: Option<&FieldValue>, error: Option<&str>) -> Self {
        let control = match field.field_type {
            FieldType::Text | FieldType::Email | FieldType::Password | FieldType::Phone => {
                Control::TextInput {
                    input_type: InputType::for_field(field.field_type),
                    placeholder: field.placeholder.clone(),
                    value: value.and_then(FieldValue::as_text).unwrap_or_default().to_string(),
                }
            }
            FieldType::Radio => Control::RadioGroup {
                options: choices(&field.values, value),
            },
            FieldType::Select => Control::Select {
                options: choices(&field.values, value),
                placeholder: field.placeholder.clone(),
            },
            FieldType::Checkbox => Control::Checkbox {
                checked: value.and_then(FieldValue::as_bool).unwrap_or(false),
            },
            FieldType::List => Control::DynamicList {
                entries: list_entries(field, value.and_then(FieldValue::as_list).unwrap_or_default()),
            },
        };

        Self {
            id: field.name.clone(),
            label: field.display_label(),
            required: field.validation.as_ref().is_some_and(|v| v.required),
            error: error.map(str::to_string),
            control,
        }
    }
}

fn choices(options: &[FieldOption], value: Option<&FieldValue>) -> Vec<Choice> {
    let selected = value.and_then(FieldValue::as_text);
    options
        .iter()
        .map(|o| Choice {
            label: o.label().to_string(),
            value: o.value().to_string(),
            selected: selected == Some(o.value()),
        })
        .collect()
}

fn list_entries(field: &FieldDescriptor, items: &[String]) -> Vec<ListEntry> {
    let label_template = if field.label.contains(ENTRY_NUMBER) {
        field.label.clone()
    } else {
        format!("{} {ENTRY_NUMBER}", field.label)
    };
    items
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let number = (index + 1).to_string();
            ListEntry {
                index,
                label: label_template.replace(ENTRY_NUMBER, &number),
                placeholder: field.placeholder.as_ref().map(|p| p.replace(ENTRY_NUMBER, &number)),
                value: value.clone(),
            }
        })
        .collect()
}

impl fmt::Display for RenderedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.required { " *" } else { "" };
        match &self.control {
            Control::TextInput {
                input_type,
                placeholder,
                value,
            } => {
                let shown = match (*input_type, value.is_empty()) {
                    (InputType::Password, false) => "*".repeat(value.chars().count()),
                    (_, false) => value.clone(),
                    (_, true) => placeholder.as_ref().map(|p| format!("<{p}>")).unwrap_or_default(),
                };
                write!(f, "{}{marker} [{}]: {shown}", self.label, input_type.as_str())?;
            }
            Control::RadioGroup { options } | Control::Select { options, .. } => {
                write!(f, "{}{marker}:", self.label)?;
                for o in options {
                    let mark = if o.selected { "(x)" } else { "( )" };
                    write!(f, " {mark} {}", o.label)?;
                }
            }
            Control::Checkbox { checked } => {
                let mark = if *checked { "[x]" } else { "[ ]" };
                write!(f, "{mark} {}{marker}", self.label)?;
            }
            Control::DynamicList { entries } => {
                write!(f, "{}{marker}:", self.label)?;
                for e in entries {
                    let shown = if e.value.is_empty() {
                        e.placeholder.as_ref().map(|p| format!("<{p}>")).unwrap_or_default()
                    } else {
                        e.value.clone()
                    };
                    write!(f, "\n  {}: {shown} [remove]", e.label)?;
                }
                write!(f, "\n  [add another]")?;
            }
        }
        if let Some(error) = &self.error {
            write!(f, "\n  ! {error}")?;
        }
        Ok(())
    }
}
