//! Form engine
//!
//! Owns the live state of one form instance: seeded values, visibility,
//! dynamic lists, the error map and the lifecycle phase. Every operation is
//! synchronous and runs to completion.
//!
//! Field names never appear here; every dependency between fields comes from
//! the catalog's `hideWhen` declarations.

use crate::config::FormConfig;
use crate::error::{EngineError, EngineResult};
use crate::lifecycle::{validate_transition, FormPhase};
use crate::list::DynamicList;
use crate::render::RenderedField;
use crate::schema::Schema;
use crate::state::{ErrorMap, FormState, Submission};
use crate::store::HandoffStore;
use crate::visibility::VisibilityResolver;
use dform_catalog::{Catalog, FieldDescriptor, FieldType, FieldValue, Scalar};
use std::collections::HashMap;
use std::sync::Arc;

/// Result of one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// No visible field failed
    pub valid: bool,
    /// Errors of visible fields
    pub errors: ErrorMap,
}

/// Result of [`FormEngine::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Record handed off
    Submitted(Submission),
    /// Field errors; nothing handed off
    Rejected(ErrorMap),
}

impl SubmitOutcome {
    /// Whether the record was handed off
    #[inline]
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// Default value of a field, applied at mount and when it becomes visible
#[must_use]
pub fn default_value(field: &FieldDescriptor) -> FieldValue {
    match (field.field_type, &field.default_checked) {
        (FieldType::Checkbox, Some(Scalar::Bool(b))) => FieldValue::Bool(*b),
        (FieldType::Checkbox, _) => FieldValue::Bool(false),
        (FieldType::Radio, Some(Scalar::Text(v))) => FieldValue::Text(v.clone()),
        (FieldType::Radio, _) => field
            .values
            .first()
            .map_or_else(FieldValue::empty_text, |o| FieldValue::from(o.value())),
        (FieldType::List, _) => DynamicList::new().snapshot(),
        _ => FieldValue::empty_text(),
    }
}

/// Catalog-driven form instance
#[derive(Debug, Clone)]
pub struct FormEngine {
    catalog: Arc<Catalog>,
    schema: Schema,
    config: FormConfig,
    state: FormState,
    errors: ErrorMap,
    lists: HashMap<String, DynamicList>,
    visibility: VisibilityResolver,
    phase: FormPhase,
}

impl FormEngine {
    /// Mount with default configuration
    #[must_use]
    pub fn mount(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self::mount_with_config(catalog, FormConfig::default())
    }

    /// Mount: derive the schema, seed defaults, resolve visibility
    #[must_use]
    pub fn mount_with_config(catalog: impl Into<Arc<Catalog>>, config: FormConfig) -> Self {
        let catalog = catalog.into();
        let schema = Schema::build(&catalog);

        let mut state = FormState::new();
        let mut lists = HashMap::new();
        for field in catalog.iter() {
            if field.field_type == FieldType::List {
                lists.insert(field.name.clone(), DynamicList::new());
            }
            state.insert(field.name.clone(), default_value(field));
        }

        let mut engine = Self {
            catalog,
            schema,
            config,
            state,
            errors: ErrorMap::new(),
            lists,
            visibility: VisibilityResolver::new(),
            phase: FormPhase::Initial,
        };
        engine.refresh_visibility();

        tracing::info!(
            "Form mounted: {} fields, {} visible",
            engine.catalog.len(),
            engine.visible_fields().count()
        );
        engine
    }

    /// Set the value of a non-list field
    ///
    /// Clears the field's own error and re-resolves visibility; dependents
    /// that become hidden lose their values.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> EngineResult<()> {
        let value = value.into();
        let field = self.editable_field(name)?;
        check_value(&field, &value)?;

        self.begin_edit()?;
        tracing::debug!(field = name, "Field changed");
        self.errors.remove(name);
        self.state.insert(name, value);
        self.refresh_visibility();
        Ok(())
    }

    /// Add an empty entry to a list field
    pub fn list_append(&mut self, name: &str) -> EngineResult<()> {
        self.edit_list(name, |list| {
            list.append();
            Ok(())
        })
    }

    /// Remove a list entry; out of range is a no-op
    pub fn list_remove(&mut self, name: &str, index: usize) -> EngineResult<()> {
        self.edit_list(name, |list| {
            list.remove_at(index);
            Ok(())
        })
    }

    /// Update a list entry
    pub fn list_set(&mut self, name: &str, index: usize, value: impl Into<String>) -> EngineResult<()> {
        let value = value.into();
        self.edit_list(name, |list| {
            list.set_at(index, value).map_err(|e| EngineError::IndexOutOfBounds {
                field: name.to_string(),
                index: e.index,
                len: e.len,
            })
        })
    }

    /// Apply a name → value record in catalog order
    ///
    /// Returns names that were skipped because they are unknown or hidden at
    /// the moment they are reached. List fields take a list (or a single text
    /// value, as a one-entry list).
    pub fn apply_values(&mut self, values: &Submission) -> EngineResult<Vec<String>> {
        let mut skipped: Vec<String> = values
            .keys()
            .filter(|k| !self.catalog.contains(k))
            .cloned()
            .collect();

        let catalog = Arc::clone(&self.catalog);
        for field in catalog.iter() {
            let Some(value) = values.get(&field.name) else {
                continue;
            };
            if self.visibility.is_hidden(&field.name) {
                skipped.push(field.name.clone());
                continue;
            }
            match (field.field_type, value) {
                (FieldType::List, FieldValue::List(items)) => {
                    let items = items.clone();
                    self.edit_list(&field.name, |list| {
                        list.replace(items);
                        Ok(())
                    })?;
                }
                (FieldType::List, FieldValue::Text(item)) => {
                    let item = item.clone();
                    self.edit_list(&field.name, |list| {
                        list.replace([item]);
                        Ok(())
                    })?;
                }
                _ => self.set_value(&field.name, value.clone())?,
            }
        }

        if !skipped.is_empty() {
            tracing::warn!("Skipped values for unknown or hidden fields: {:?}", skipped);
        }
        Ok(skipped)
    }

    /// Validate visible fields and store the resulting error map
    pub fn validate(&mut self) -> ValidationReport {
        let errors = {
            let visibility = &self.visibility;
            self.schema.validate(&self.state, |name| !visibility.is_hidden(name))
        };
        self.errors = errors.clone();
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Validate and, if valid, hand the visible values to `store`
    ///
    /// Field errors are reported through [`SubmitOutcome::Rejected`]; `Err` is
    /// reserved for lifecycle misuse and store failures.
    pub fn submit<S>(&mut self, store: &mut S) -> EngineResult<SubmitOutcome>
    where
        S: HandoffStore + ?Sized,
    {
        self.transition(FormPhase::Validating)?;
        let report = self.validate();

        if !report.valid {
            self.transition(FormPhase::Rejected)?;
            tracing::info!("Submission rejected: {} field error(s)", report.errors.len());
            return Ok(SubmitOutcome::Rejected(report.errors));
        }

        let record = self.snapshot();
        if let Err(e) = store.write(&self.config.handoff_key, &record) {
            self.transition(FormPhase::Editing)?;
            tracing::warn!("Hand-off failed: {}", e);
            return Err(e.into());
        }

        self.transition(FormPhase::Submitted)?;
        tracing::info!(
            key = %self.config.handoff_key,
            "Form submitted with {} field(s)",
            record.len()
        );
        Ok(SubmitOutcome::Submitted(record))
    }

    /// Visible values in catalog order
    #[must_use]
    pub fn snapshot(&self) -> Submission {
        self.visible_fields()
            .filter_map(|f| self.state.get(&f.name).map(|v| (f.name.clone(), v.clone())))
            .collect()
    }

    /// Render model of every visible field
    #[must_use]
    pub fn render(&self) -> Vec<RenderedField> {
        self.visible_fields()
            .map(|f| RenderedField::build(f, self.state.get(&f.name), self.errors.message(&f.name)))
            .collect()
    }

    /// Visible fields in catalog order
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.catalog
            .iter()
            .filter(|f| !self.visibility.is_hidden(&f.name))
    }

    /// Whether `name` is in the catalog and visible
    #[must_use]
    pub fn is_visible(&self, name: &str) -> bool {
        self.catalog.contains(name) && !self.visibility.is_hidden(name)
    }

    /// Current value of `name`
    #[inline]
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.state.get(name)
    }

    /// Entries of a list field
    #[must_use]
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.lists.get(name).map(DynamicList::entries)
    }

    /// Live form state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Errors from the last validation, minus fields edited since
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Lifecycle phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Catalog this form was mounted with
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Derived validation schema
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    fn editable_field(&self, name: &str) -> EngineResult<FieldDescriptor> {
        let field = self
            .catalog
            .get(name)
            .ok_or_else(|| EngineError::UnknownField(name.to_string()))?;
        if self.visibility.is_hidden(name) {
            return Err(EngineError::FieldHidden(name.to_string()));
        }
        Ok(field.clone())
    }

    fn edit_list<F>(&mut self, name: &str, op: F) -> EngineResult<()>
    where
        F: FnOnce(&mut DynamicList) -> EngineResult<()>,
    {
        let field = self.editable_field(name)?;
        if field.field_type != FieldType::List {
            return Err(EngineError::TypeMismatch {
                field: field.name,
                field_type: field.field_type,
                found: "list",
            });
        }

        // Edit a copy so a failed operation leaves list and phase untouched
        let mut list = self.lists.get(&field.name).cloned().unwrap_or_default();
        op(&mut list)?;
        self.begin_edit()?;

        tracing::debug!(field = name, entries = list.len(), "List changed");
        let snapshot = list.snapshot();
        self.lists.insert(field.name.clone(), list);
        self.errors.remove(name);
        self.state.insert(field.name, snapshot);
        self.refresh_visibility();
        Ok(())
    }

    fn begin_edit(&mut self) -> EngineResult<()> {
        self.transition(FormPhase::Editing)
    }

    fn transition(&mut self, to: FormPhase) -> EngineResult<()> {
        validate_transition(self.phase, to)?;
        if self.phase != to {
            tracing::debug!("Phase {:?} -> {:?}", self.phase, to);
        }
        self.phase = to;
        Ok(())
    }

    /// Resolve visibility to a fixed point, clearing newly hidden fields and
    /// re-seeding newly shown ones
    fn refresh_visibility(&mut self) {
        let catalog = Arc::clone(&self.catalog);
        let max_passes = catalog.len() + 1;

        for _ in 0..max_passes {
            let delta = {
                let state = &self.state;
                self.visibility.pass(&catalog, |name| state.get(name))
            };
            if delta.is_empty() {
                return;
            }

            for name in &delta.hidden {
                tracing::debug!(field = %name, "Field hidden");
                self.errors.remove(name);
                if self.config.clear_hidden_values {
                    self.state.remove(name);
                }
                if let Some(list) = self.lists.get_mut(name) {
                    list.reset();
                    if !self.config.clear_hidden_values {
                        self.state.insert(name.clone(), list.snapshot());
                    }
                }
            }
            for name in &delta.shown {
                tracing::debug!(field = %name, "Field shown");
                if let Some(list) = self.lists.get(name) {
                    self.state.insert(name.clone(), list.snapshot());
                } else if !self.state.contains(name) {
                    if let Some(field) = catalog.get(name) {
                        self.state.insert(name.clone(), default_value(field));
                    }
                }
            }
            if !delta.shown.is_empty() {
                self.state
                    .sort_by_position(|name| catalog.position(name).unwrap_or(usize::MAX));
            }
        }

        tracing::warn!(
            "Visibility did not settle after {} passes; hideWhen conditions may be circular",
            max_passes
        );
    }
}

/// Check that `value` fits the field's type and options
fn check_value(field: &FieldDescriptor, value: &FieldValue) -> EngineResult<()> {
    let mismatch = || EngineError::TypeMismatch {
        field: field.name.clone(),
        field_type: field.field_type,
        found: value.kind(),
    };

    match (field.field_type, value) {
        (FieldType::Checkbox, FieldValue::Bool(_)) => Ok(()),
        (FieldType::Radio | FieldType::Select, FieldValue::Text(v)) => {
            let clearing_select = field.field_type == FieldType::Select && v.is_empty();
            if clearing_select || field.has_option(v) {
                Ok(())
            } else {
                Err(EngineError::InvalidOption {
                    field: field.name.clone(),
                    value: v.clone(),
                })
            }
        }
        (t, FieldValue::Text(_)) if t.is_text_like() => Ok(()),
        _ => Err(mismatch()),
    }
}
