//! Visibility resolution from `hideWhen`
//!
//! A field is hidden when any of its groups matches; a group matches when any
//! of its conditions holds. A referenced field with no value never equals a
//! literal, so `notEqual` holds and `equal` does not.

use dform_catalog::{Catalog, FieldDescriptor, FieldValue, Relation, VisibilityGroup};
use std::collections::HashSet;

/// Whether `field` is hidden, given a lookup of live values
pub fn is_hidden<'a, F>(field: &FieldDescriptor, lookup: F) -> bool
where
    F: Fn(&str) -> Option<&'a FieldValue>,
{
    field.hide_when.iter().any(|group| group_matches(group, &lookup))
}

fn group_matches<'a, F>(group: &VisibilityGroup, lookup: &F) -> bool
where
    F: Fn(&str) -> Option<&'a FieldValue>,
{
    group.conditions.iter().any(|condition| {
        let equal = lookup(&condition.name).is_some_and(|v| v.matches(&condition.value));
        match group.relation {
            Relation::Equal => equal,
            Relation::NotEqual => !equal,
        }
    })
}

/// Visibility changes produced by one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityDelta {
    /// Fields that became hidden
    pub hidden: Vec<String>,
    /// Fields that became visible
    pub shown: Vec<String>,
}

impl VisibilityDelta {
    /// Whether nothing changed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.shown.is_empty()
    }
}

/// Tracks which catalog fields are currently hidden
///
/// Hidden fields are treated as having no value when other fields' conditions
/// are evaluated, so hiding cascades down dependency chains.
#[derive(Debug, Clone, Default)]
pub struct VisibilityResolver {
    hidden: HashSet<String>,
}

impl VisibilityResolver {
    /// Create resolver with every field visible
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is currently hidden
    #[inline]
    #[must_use]
    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(name)
    }

    /// One pass over the catalog in declaration order
    ///
    /// `lookup` sees the live state; values of fields hidden so far (including
    /// ones hidden earlier in this pass) are masked.
    pub fn pass<'a, F>(&mut self, catalog: &Catalog, lookup: F) -> VisibilityDelta
    where
        F: Fn(&str) -> Option<&'a FieldValue>,
    {
        let mut delta = VisibilityDelta::default();
        for field in catalog {
            let hidden = {
                let masked = |name: &str| {
                    if self.hidden.contains(name) {
                        None
                    } else {
                        lookup(name)
                    }
                };
                is_hidden(field, masked)
            };
            let was_hidden = self.hidden.contains(&field.name);
            if hidden && !was_hidden {
                self.hidden.insert(field.name.clone());
                delta.hidden.push(field.name.clone());
            } else if !hidden && was_hidden {
                self.hidden.remove(&field.name);
                delta.shown.push(field.name.clone());
            }
        }
        delta
    }

    /// Names of hidden fields
    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }
}
