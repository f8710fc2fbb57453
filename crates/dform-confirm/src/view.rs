//! Confirmation rows and text rendering

use dform_catalog::{DisplayNames, FieldValue};
use dform_engine::{HandoffStore, StoreError, Submission};
use serde::Serialize;
use std::fmt;

/// Heading printed above the rows
pub const CONFIRMATION_TITLE: &str = "Confirmation Page";

/// One labelled value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationRow {
    /// Field name as stored
    pub key: String,
    /// Display name, or the key when no mapping exists
    pub label: String,
    /// Display text of the value
    pub value: String,
}

impl ConfirmationRow {
    /// Build a row from a stored entry
    #[must_use]
    pub fn new(key: &str, value: &FieldValue, names: &DisplayNames) -> Self {
        Self {
            key: key.to_string(),
            label: names.label_for(key).to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ConfirmationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Labelled rows of a handed-off record, in record order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    rows: Vec<ConfirmationRow>,
    confirmed: bool,
}

impl ConfirmationView {
    /// Read `key` from `store` and label the record with `names`
    ///
    /// # Errors
    ///
    /// Only store failures (unreadable or corrupt backing file). A key that
    /// was never written yields an empty view.
    pub fn load<S>(store: &S, key: &str, names: &DisplayNames) -> Result<Self, StoreError>
    where
        S: HandoffStore + ?Sized,
    {
        let view = match store.read(key)? {
            Some(record) => Self::from_record(&record, names),
            None => {
                tracing::info!(key, "No handed-off record, showing empty confirmation");
                Self::default()
            }
        };
        tracing::debug!(key, rows = view.len(), "Confirmation view loaded");
        Ok(view)
    }

    /// Build from an in-memory record
    #[must_use]
    pub fn from_record(record: &Submission, names: &DisplayNames) -> Self {
        Self {
            rows: record
                .iter()
                .map(|(key, value)| ConfirmationRow::new(key, value, names))
                .collect(),
            confirmed: false,
        }
    }

    /// Rows in record order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[ConfirmationRow] {
        &self.rows
    }

    /// Row for `key`
    #[must_use]
    pub fn row(&self, key: &str) -> Option<&ConfirmationRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there is nothing to show
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record the user's confirmation
    ///
    /// Returns `false` if the view was already confirmed.
    pub fn confirm(&mut self) -> bool {
        if self.confirmed {
            return false;
        }
        self.confirmed = true;
        tracing::info!(rows = self.rows.len(), "Submission confirmed");
        true
    }

    /// Whether [`confirm`](Self::confirm) has been called
    #[inline]
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Title line followed by one `label: value` line per row
    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConfirmationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(CONFIRMATION_TITLE)?;
        for row in &self.rows {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dform_engine::{JsonFileStore, MemoryStore, CONFIRMATION_KEY};
    use dform_test_utils::{name_fields, NAME_FIELDS_JSON};
    use pretty_assertions::assert_eq;

    fn record() -> Submission {
        let mut r = Submission::new();
        r.insert("firstName".to_string(), FieldValue::from("Ada"));
        r.insert("terms".to_string(), FieldValue::Bool(true));
        r.insert("newsletter".to_string(), FieldValue::Bool(false));
        r.insert(
            "childrenNames".to_string(),
            FieldValue::List(vec!["Byron".to_string(), "Ralph".to_string()]),
        );
        r
    }

    #[test]
    fn labels_fall_back_to_raw_key() {
        let mut names = DisplayNames::new();
        names.insert("firstName", "First Name");

        let view = ConfirmationView::from_record(&record(), &names);
        assert_eq!(view.row("firstName").unwrap().label, "First Name");
        assert_eq!(view.row("newsletter").unwrap().label, "newsletter");
    }

    #[test]
    fn values_render_for_display() {
        let view = ConfirmationView::from_record(&record(), &DisplayNames::new());
        let values: Vec<&str> = view.rows().iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["Ada", "Yes", "No", "Byron, Ralph"]);
    }

    #[test]
    fn missing_key_is_empty_view() {
        let store = MemoryStore::new();
        let view = ConfirmationView::load(&store, CONFIRMATION_KEY, &DisplayNames::new()).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.render_text(), CONFIRMATION_TITLE);
    }

    #[test]
    fn render_text_lists_rows_in_order() {
        let mut store = MemoryStore::new();
        store.write(CONFIRMATION_KEY, &record()).unwrap();

        let view = ConfirmationView::load(&store, CONFIRMATION_KEY, &name_fields()).unwrap();
        assert_eq!(
            view.render_text(),
            "Confirmation Page\nFirst Name: Ada\nAccepted Terms: Yes\nnewsletter: No\nchildrenNames: Byron, Ralph"
        );
    }

    #[test]
    fn reads_from_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("localStorage.json"));
        store.write(CONFIRMATION_KEY, &record()).unwrap();

        let names = DisplayNames::from_json_str(NAME_FIELDS_JSON).unwrap();
        let view = ConfirmationView::load(&store, CONFIRMATION_KEY, &names).unwrap();
        assert_eq!(view.len(), 4);
        assert_eq!(view.row("terms").unwrap().to_string(), "Accepted Terms: Yes");
    }

    #[test]
    fn confirm_is_one_shot() {
        let mut view = ConfirmationView::from_record(&record(), &DisplayNames::new());
        assert!(!view.is_confirmed());
        assert!(view.confirm());
        assert!(!view.confirm());
        assert!(view.is_confirmed());
    }
}
