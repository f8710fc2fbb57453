//! Hand-off store
//!
//! Carries the validated record from the form page to the confirmation page.
//! The form writes once on successful submission; the confirmation page reads
//! once and treats a missing key as an empty record.

use crate::error::StoreError;
use crate::state::Submission;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key → record store shared by the two pages
pub trait HandoffStore {
    /// Write `record` under `key`, replacing any previous record
    fn write(&mut self, key: &str, record: &Submission) -> Result<(), StoreError>;

    /// Read the record under `key`
    fn read(&self, key: &str) -> Result<Option<Submission>, StoreError>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, Submission>,
    writes: usize,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes so far
    #[inline]
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Borrow the record under `key`
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Submission> {
        self.records.get(key)
    }
}

impl HandoffStore for MemoryStore {
    fn write(&mut self, key: &str, record: &Submission) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), record.clone());
        self.writes += 1;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Submission>, StoreError> {
        Ok(self.records.get(key).cloned())
    }
}

/// JSON-file store, the session-scoped analogue of browser local storage
///
/// The file holds one JSON object mapping keys to records. Other keys in the
/// file are preserved on write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`; the file is created on first write
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_document(&self) -> Result<IndexMap<String, serde_json::Value>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(source) if source.trim().is_empty() => Ok(IndexMap::new()),
            Ok(source) => Ok(serde_json::from_str(&source)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(IndexMap::new()),
            Err(e) => Err(StoreError::io_error(&self.path, e)),
        }
    }
}

impl HandoffStore for JsonFileStore {
    fn write(&mut self, key: &str, record: &Submission) -> Result<(), StoreError> {
        let mut document = self.load_document()?;
        document.insert(key.to_string(), serde_json::to_value(record)?);
        let body = serde_json::to_string_pretty(&document)?;
        std::fs::write(&self.path, body).map_err(|e| StoreError::io_error(&self.path, e))?;
        tracing::debug!(key, path = %self.path.display(), "Record written to hand-off store");
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Submission>, StoreError> {
        let mut document = self.load_document()?;
        match document.shift_remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
