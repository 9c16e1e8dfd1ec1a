//! Sources of default file content.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

/// Supplies bundled default content by resource name.
///
/// A missing resource is not an error: the file is bootstrapped empty.
pub trait ResourceSource: Send + Sync + std::fmt::Debug {
    /// Returns the bytes of the named resource, if it exists.
    fn open(&self, name: &str) -> Option<Cow<'_, [u8]>>;
}

/// Resources held in memory, typically from `include_bytes!`.
///
/// # Example
///
/// ```
/// use albatross::file::{EmbeddedResources, ResourceSource};
///
/// let resources = EmbeddedResources::new().with("config.yml", b"# Defaults\nkey: 1\n");
/// assert!(resources.open("config.yml").is_some());
/// assert!(resources.open("missing.yml").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    entries: HashMap<String, Cow<'static, [u8]>>,
}

impl EmbeddedResources {
    /// Creates an empty set of resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a static resource.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, content: &'static [u8]) -> Self {
        self.entries.insert(name.into(), Cow::Borrowed(content));
        self
    }

    /// Adds an owned resource.
    pub fn insert(&mut self, name: impl Into<String>, content: Vec<u8>) {
        self.entries.insert(name.into(), Cow::Owned(content));
    }
}

impl ResourceSource for EmbeddedResources {
    fn open(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.entries.get(name).map(|content| Cow::Borrowed(content.as_ref()))
    }
}

/// Resources read from a bundle directory on disk.
///
/// Names may contain `/` to address nested files. Unreadable files are
/// reported as absent.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceSource for DirectoryResources {
    fn open(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        let path = name
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment));
        match std::fs::read(&path) {
            Ok(content) => Some(Cow::Owned(content)),
            Err(e) => {
                tracing::debug!("Resource '{name}' unavailable at {}: {e}", path.display());
                None
            }
        }
    }
}
