//! The in-memory configuration document and its load/save cycle.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::escape::escape;
use crate::file::{BackupOutcome, ConfigFile, ResourceSource};
use crate::transcode::CommentTranscoder;

use super::path::{self, scalar_text};
use super::{ConfigError, Section};

/// A comment-preserving YAML configuration file.
///
/// Loading bootstraps the file from its default resource when it is missing,
/// turns every `#` line into a synthetic entry, and parses the result.
/// Saving serializes the document and turns those entries back into
/// comments. Synthetic entries never show up through the getters.
///
/// # Example
///
/// ```no_run
/// use albatross::config::Configuration;
///
/// # fn main() -> Result<(), albatross::config::ConfigError> {
/// let mut config = Configuration::new("plugins/demo/config.yml", "demo")?;
/// config.load()?;
/// config.set_with_comment("motd", "Welcome!", "Shown on join");
/// config.save()?;
/// # Ok(())
/// # }
/// ```
///
/// # Concurrency
///
/// A `Configuration` is plain mutable state with no internal locking. Share
/// it behind a `Mutex` or keep it on a single task; file operations block.
#[derive(Debug, Clone)]
pub struct Configuration {
    file: ConfigFile,
    transcoder: CommentTranscoder,
    resources: Option<Arc<dyn ResourceSource>>,
    resource_name: String,
    root: Mapping,
    comment_count: usize,
}

impl Configuration {
    /// Creates an empty configuration backed by `path`.
    ///
    /// Synthetic comment keys are prefixed with `namespace`. Nothing is read
    /// until [`load`](Self::load) is called.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFileName`] for an empty path and
    /// [`ConfigError::InvalidNamespace`] for an unusable namespace.
    pub fn new(path: impl AsRef<Path>, namespace: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let resource_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or(ConfigError::InvalidFileName)?;
        Self::with_file(ConfigFile::new(path), resource_name, namespace)
    }

    /// Creates a configuration for `name` inside `base`.
    ///
    /// `name` uses `/` separators and doubles as the default resource name
    /// once a source is attached with [`with_resources`](Self::with_resources).
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn in_dir(base: &Path, name: &str, namespace: &str) -> Result<Self, ConfigError> {
        if name.trim_matches('/').is_empty() {
            return Err(ConfigError::InvalidFileName);
        }
        Self::with_file(ConfigFile::in_dir(base, name), name.to_owned(), namespace)
    }

    fn with_file(
        file: ConfigFile,
        resource_name: String,
        namespace: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            file,
            transcoder: CommentTranscoder::new(namespace)?,
            resources: None,
            resource_name,
            root: Mapping::new(),
            comment_count: 0,
        })
    }

    /// Bootstraps from `source` using the resource named like the file.
    ///
    /// The name is the one given to [`in_dir`](Self::in_dir), or the final
    /// path component for [`new`](Self::new).
    #[must_use]
    pub fn with_resources(mut self, source: Arc<dyn ResourceSource>) -> Self {
        self.resources = Some(source);
        self
    }

    /// Bootstraps from the resource `name` of `source`.
    #[must_use]
    pub fn with_resource(mut self, source: Arc<dyn ResourceSource>, name: impl Into<String>) -> Self {
        self.resources = Some(source);
        self.resource_name = name.into();
        self
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns the namespace of synthetic comment keys.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.transcoder.namespace()
    }

    /// Returns how many comment keys have been allocated this session.
    ///
    /// Starts at the number of comment lines found by the last load and
    /// grows by one for every comment line attached with `set_with_comment*`.
    #[must_use]
    pub const fn comment_count(&self) -> usize {
        self.comment_count
    }

    /// Loads, or reloads, the document from disk.
    ///
    /// Creates the file from its default resource if it does not exist yet.
    /// On failure the in-memory document is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::File`] if the file cannot be created or read,
    /// [`ConfigError::Parse`] if the content is not valid YAML,
    /// [`ConfigError::MisplacedComment`] if a comment interrupts a nested
    /// block, and
    /// [`ConfigError::NotAMapping`] if its top level is not a mapping.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let default_content = self
            .resources
            .as_ref()
            .and_then(|source| source.open(&self.resource_name));
        self.file.ensure_exists(default_content.as_deref())?;

        let raw = self.file.read_raw()?;
        let encoded = self.transcoder.encode(&raw).map_err(|source| {
            ConfigError::MisplacedComment {
                path: self.file.path().to_path_buf(),
                source,
            }
        })?;
        let root = match serde_yaml::from_str::<Value>(&encoded.text) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(Value::Null) => Mapping::new(),
            Ok(_) => {
                return Err(ConfigError::NotAMapping {
                    path: self.file.path().to_path_buf(),
                });
            }
            Err(source) => {
                return Err(ConfigError::Parse {
                    path: self.file.path().to_path_buf(),
                    source,
                });
            }
        };

        self.root = root;
        self.comment_count = encoded.comment_count;
        tracing::debug!(
            "Loaded {} ({} entries, {} comments)",
            self.file.path().display(),
            self.root.len(),
            self.comment_count
        );
        Ok(())
    }

    /// Writes the document, with its comments, back to disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if the document cannot be
    /// serialized and [`ConfigError::File`] if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let text = self.to_text()?;
        self.file.write_raw(&text)?;
        tracing::debug!("Saved {}", self.file.path().display());
        Ok(())
    }

    /// Renders the document as it would be written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if the document cannot be serialized.
    pub fn to_text(&self) -> Result<String, ConfigError> {
        if self.root.is_empty() {
            return Ok(String::new());
        }
        let serialized = serde_yaml::to_string(&self.root).map_err(ConfigError::Serialize)?;
        Ok(self.transcoder.decode(&serialized))
    }

    /// Copies the file to `<file>.bak` if it changed since the last backup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::File`] if the file cannot be inspected or copied.
    pub fn backup_configuration(&self) -> Result<BackupOutcome, ConfigError> {
        Ok(self.file.backup()?)
    }

    /// Returns the value at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        if self.transcoder.is_comment_key(path) {
            return None;
        }
        path::lookup(&self.root, path)
    }

    /// Returns `true` if a value exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Returns the value at `path` as text, if it is a scalar.
    ///
    /// Numbers and booleans are rendered the way they appear in the file.
    #[must_use]
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(scalar_text)
    }

    /// Returns the boolean at `path`.
    #[must_use]
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Returns the integer at `path`.
    #[must_use]
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }

    /// Returns the number at `path` as a float.
    #[must_use]
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(Value::as_f64)
    }

    /// Deserializes the value at `path` into `T`.
    ///
    /// Returns `None` if the path is absent or the value does not fit `T`.
    #[must_use]
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let value = self.get(path)?.clone();
        serde_yaml::from_value(value)
            .map_err(|e| tracing::debug!("Value at '{path}' has unexpected shape: {e}"))
            .ok()
    }

    /// Returns the sequence at `path`.
    ///
    /// Missing and non-sequence values yield an empty slice; the document
    /// is never modified.
    #[must_use]
    pub fn get_list(&self, path: &str) -> &[Value] {
        self.get(path)
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the scalar items of the sequence at `path` as text.
    #[must_use]
    pub fn get_string_list(&self, path: &str) -> Vec<String> {
        self.get_list(path).iter().filter_map(scalar_text).collect()
    }

    /// Returns the section at `path`, creating an empty one if absent.
    ///
    /// Repeated calls with the same path return the same section. A
    /// non-mapping value at `path` is replaced by an empty section.
    pub fn get_section(&mut self, path: &str) -> Section<'_> {
        Section::new(path::section_mut(&mut self.root, path))
    }

    /// Returns the real top-level keys in document order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.root
            .keys()
            .filter_map(scalar_text)
            .filter(|key| !self.transcoder.is_comment_key(key))
            .collect()
    }

    /// Assigns `value` at `path`, creating parent sections as needed.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        path::assign(&mut self.root, path, value.into());
    }

    /// Assigns `value` at `path` with a comment line written above it.
    pub fn set_with_comment(&mut self, path: &str, value: impl Into<Value>, comment: &str) {
        self.set_with_comments(path, value, [comment]);
    }

    /// Assigns `value` at `path` with one comment line per item above it.
    ///
    /// Comments attach to the top-level entry `path` lives under: they are
    /// placed right before it if it exists, otherwise right before the new
    /// entry. Each line of a comment is written as `# <line>`.
    pub fn set_with_comments<I, S>(&mut self, path: &str, value: impl Into<Value>, comments: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = comments
            .into_iter()
            .flat_map(|comment| comment_lines(comment.as_ref()))
            .collect();
        let entries: Vec<(Value, Value)> = lines
            .iter()
            .map(|line| self.allocate_comment(line))
            .collect();
        if !entries.is_empty() {
            self.insert_before(path::top_segment(path), entries);
        }
        self.set(path, value);
    }

    /// Removes the value at `path`, returning it.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        if self.transcoder.is_comment_key(path) {
            return None;
        }
        path::remove(&mut self.root, path)
    }

    fn allocate_comment(&mut self, text: &str) -> (Value, Value) {
        let key = self.transcoder.comment_key(self.comment_count);
        self.comment_count += 1;
        let body = if text.is_empty() {
            String::new()
        } else {
            format!(" {text}")
        };
        (Value::String(key), Value::String(escape(&body)))
    }

    /// Inserts `entries` before the top-level key `anchor`, or appends them.
    fn insert_before(&mut self, anchor: &str, entries: Vec<(Value, Value)>) {
        let anchor_key = path::resolve_key(&self.root, anchor);
        if !self.root.contains_key(&anchor_key) {
            self.root.extend(entries);
            return;
        }

        let previous = std::mem::take(&mut self.root);
        let mut entries = Some(entries);
        for (key, value) in previous {
            if key == anchor_key {
                if let Some(entries) = entries.take() {
                    self.root.extend(entries);
                }
            }
            self.root.insert(key, value);
        }
    }
}

/// Splits a caller-supplied comment into single lines.
///
/// An empty comment still yields one (empty) line.
fn comment_lines(comment: &str) -> Vec<String> {
    if comment.is_empty() {
        return vec![String::new()];
    }
    comment.lines().map(str::to_owned).collect()
}
