//! Dynamic list controller
//!
//! Owned, contiguous list of text entries backing a `list` field. The engine
//! publishes [`DynamicList::snapshot`] into form state after every mutation.

use dform_catalog::FieldValue;

/// `set_at` past the end of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("index {index} out of bounds for list of length {len}")]
pub struct OutOfBounds {
    /// Requested index
    pub index: usize,
    /// List length at the time
    pub len: usize,
}

/// Growable list of text entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicList {
    entries: Vec<String>,
}

impl DynamicList {
    /// List with a single empty entry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![String::new()],
        }
    }

    /// List with the given entries
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Add one empty entry at the end
    pub fn append(&mut self) {
        self.entries.push(String::new());
    }

    /// Remove the entry at `index`; out of range is a no-op
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Update the entry at `index`
    pub fn set_at(&mut self, index: usize, value: impl Into<String>) -> Result<(), OutOfBounds> {
        let len = self.entries.len();
        let slot = self.entries.get_mut(index).ok_or(OutOfBounds { index, len })?;
        *slot = value.into();
        Ok(())
    }

    /// Replace all entries
    pub fn replace<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries = entries.into_iter().map(Into::into).collect();
    }

    /// Back to a single empty entry
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(String::new());
    }

    /// Current entries
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Value to publish into form state
    #[must_use]
    pub fn snapshot(&self) -> FieldValue {
        FieldValue::List(self.entries.clone())
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DynamicList {
    fn default() -> Self {
        Self::new()
    }
}
