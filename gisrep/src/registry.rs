//! Tag registry for locating implementations by name
//!
//! Templates and output sinks are selected at runtime by a short string tag.
//! The registry is populated once at startup with explicit `register` calls
//! and read many times afterwards; there is no dynamic discovery.

use crate::{GisrepError, Result};
use std::collections::BTreeMap;

/// Maps a closed set of string tags to their implementations
///
/// Tags are unique within a registry; registering a duplicate is an error.
/// Lookups of unknown tags return `None` so callers can report the failure
/// with their own error category.
pub struct Registry<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Registry<T> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register an entry under a tag
    pub fn register(&mut self, tag: impl Into<String>, entry: T) -> Result<()> {
        let tag = tag.into();
        if self.entries.contains_key(&tag) {
            return Err(GisrepError::Config(format!(
                "tag '{}' is already registered",
                tag
            )));
        }
        self.entries.insert(tag, entry);
        Ok(())
    }

    /// Look up an entry by tag
    pub fn get(&self, tag: &str) -> Option<&T> {
        self.entries.get(tag)
    }

    /// Get all registered tags, sorted
    pub fn tags(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterate over all entries in tag order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(tag, entry)| (tag.as_str(), entry))
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
