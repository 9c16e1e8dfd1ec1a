//! Mutable view of a nested section.

use serde_yaml::{Mapping, Value};

use super::path;

/// A nested section of a [`Configuration`](super::Configuration).
///
/// Borrowed from the document, so changes made through it are part of the
/// next save. Paths are relative to the section.
#[derive(Debug)]
pub struct Section<'a> {
    mapping: &'a mut Mapping,
}

impl<'a> Section<'a> {
    pub(super) fn new(mapping: &'a mut Mapping) -> Self {
        Self { mapping }
    }

    /// Returns the value at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        path::lookup(&*self.mapping, path)
    }

    /// Returns the value at `path` rendered as text, if it is a scalar.
    #[must_use]
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(path::scalar_text)
    }

    /// Assigns `value` at `path`, creating nested sections as needed.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        path::assign(self.mapping, path, value.into());
    }

    /// Returns the nested section at `path`, creating it if absent.
    pub fn section(&mut self, path: &str) -> Section<'_> {
        Section::new(path::section_mut(self.mapping, path))
    }

    /// Returns the keys of this section in document order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.mapping.keys().filter_map(path::scalar_text).collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Returns `true` if the section has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
