//! Dotted-path navigation over YAML mappings.
//!
//! `server.http.port` addresses the `port` entry of the `http` section of the
//! `server` section. Keys are compared by their text, so a path segment `1`
//! finds an integer key `1` written in the file.

use serde_yaml::{Mapping, Value};

use crate::defaults::PATH_SEPARATOR;

/// Returns the text of a scalar key, or `None` for composite keys.
pub(crate) fn scalar_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Returns the first segment of `path`.
pub(crate) fn top_segment(path: &str) -> &str {
    path.split(PATH_SEPARATOR).next().unwrap_or(path)
}

/// Finds the key of `mapping` addressed by `segment`.
///
/// Falls back to a fresh string key when no existing key matches, so
/// assignments never create a second key with the same text.
pub(crate) fn resolve_key(mapping: &Mapping, segment: &str) -> Value {
    if mapping.contains_key(segment) {
        return Value::String(segment.to_owned());
    }
    mapping
        .keys()
        .find(|key| scalar_text(key).as_deref() == Some(segment))
        .cloned()
        .unwrap_or_else(|| Value::String(segment.to_owned()))
}

fn child<'a>(mapping: &'a Mapping, segment: &str) -> Option<&'a Value> {
    mapping.get(segment).or_else(|| {
        mapping
            .iter()
            .find(|(key, _)| scalar_text(key).as_deref() == Some(segment))
            .map(|(_, value)| value)
    })
}

/// Looks up the value at `path`.
pub(crate) fn lookup<'a>(root: &'a Mapping, path: &str) -> Option<&'a Value> {
    let mut segments = path.split(PATH_SEPARATOR);
    let first = child(root, segments.next()?)?;
    segments.try_fold(first, |value, segment| child(value.as_mapping()?, segment))
}

/// Returns the section at `path`, creating it and any missing parents.
///
/// A non-mapping value found on the way is replaced by an empty section.
pub(crate) fn section_mut<'a>(root: &'a mut Mapping, path: &str) -> &'a mut Mapping {
    path.split(PATH_SEPARATOR)
        .fold(root, |section, segment| child_section(section, segment))
}

fn child_section<'a>(section: &'a mut Mapping, segment: &str) -> &'a mut Mapping {
    let key = resolve_key(section, segment);
    let slot = section
        .entry(key)
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    if !slot.is_mapping() {
        *slot = Value::Mapping(Mapping::new());
    }
    match slot {
        Value::Mapping(mapping) => mapping,
        _ => unreachable!("slot was just set to a mapping"),
    }
}

/// Returns the existing section at `path` without creating anything.
fn existing_section_mut<'a>(root: &'a mut Mapping, path: &str) -> Option<&'a mut Mapping> {
    path.split(PATH_SEPARATOR).try_fold(root, |section, segment| {
        let key = resolve_key(section, segment);
        section.get_mut(&key)?.as_mapping_mut()
    })
}

/// Assigns `value` at `path`, creating parent sections as needed.
///
/// An existing entry keeps its position; a new one is appended.
pub(crate) fn assign(root: &mut Mapping, path: &str, value: Value) {
    let (section, leaf) = match path.rsplit_once(PATH_SEPARATOR) {
        Some((parent, leaf)) => (section_mut(root, parent), leaf),
        None => (root, path),
    };
    let key = resolve_key(section, leaf);
    section.insert(key, value);
}

/// Removes the entry at `path`, keeping the order of its siblings.
pub(crate) fn remove(root: &mut Mapping, path: &str) -> Option<Value> {
    let (section, leaf) = match path.rsplit_once(PATH_SEPARATOR) {
        Some((parent, leaf)) => (existing_section_mut(root, parent)?, leaf),
        None => (root, path),
    };
    let key = resolve_key(section, leaf);
    section.shift_remove(&key)
}
