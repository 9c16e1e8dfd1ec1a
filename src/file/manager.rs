//! Bootstrap, read, write and backup of a single file.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::defaults::{BACKUP_SUFFIX, TEMP_SUFFIX};

use super::{BackupOutcome, FileError};

/// A configuration file on disk and its co-located backup.
///
/// # Atomic Writes
///
/// [`write_raw`](Self::write_raw) uses the write-to-temp-then-rename pattern:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// The file is either fully replaced or left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
    backup_path: PathBuf,
}

impl ConfigFile {
    /// Creates a handle for the file at `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_path = with_suffix(&path, BACKUP_SUFFIX);
        Self { path, backup_path }
    }

    /// Creates a handle for `name` relative to `base`.
    ///
    /// `name` uses `/` as separator regardless of platform; a leading `/`
    /// is still relative to `base`.
    #[must_use]
    pub fn in_dir(base: &Path, name: &str) -> Self {
        let path = name
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(base.to_path_buf(), |path, segment| path.join(segment));
        Self::new(path)
    }

    /// Returns the path of the primary file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of the backup file (`<path>.bak`).
    #[must_use]
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Returns `true` if the primary file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Creates the file, and its parent directories, if it does not exist.
    ///
    /// A newly created file receives `default_content` verbatim, or stays
    /// empty when there is none. An existing file is left untouched.
    ///
    /// Returns `true` if the file was created by this call.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Create`] if the directories or the file cannot
    /// be created, or [`FileError::Write`] if the default content cannot be
    /// written.
    pub fn ensure_exists(&self, default_content: Option<&[u8]>) -> Result<bool, FileError> {
        self.create_parent().map_err(|source| FileError::Create {
            path: self.path.clone(),
            source,
        })?;

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(source) => {
                return Err(FileError::Create {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if let Some(content) = default_content {
            file.write_all(content)
                .and_then(|()| file.flush())
                .map_err(|source| FileError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }

        tracing::info!("Successfully created {}", self.path.display());
        Ok(true)
    }

    /// Reads the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Read`] if the file is missing, unreadable, or not
    /// valid UTF-8.
    pub fn read_raw(&self) -> Result<String, FileError> {
        fs::read_to_string(&self.path).map_err(|source| FileError::Read {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the whole file with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Write`] if the temporary file cannot be written
    /// or renamed over the primary file.
    pub fn write_raw(&self, text: &str) -> Result<(), FileError> {
        let write_error = |source| FileError::Write {
            path: self.path.clone(),
            source,
        };

        self.create_parent().map_err(write_error)?;

        // Append .tmp instead of replacing the extension (config.yml -> config.yml.tmp)
        let temp_path = with_suffix(&self.path, TEMP_SUFFIX);
        fs::write(&temp_path, text).map_err(write_error)?;
        fs::rename(&temp_path, &self.path).map_err(write_error)?;

        Ok(())
    }

    /// Copies the primary file to `<path>.bak` if the primary is newer.
    ///
    /// A missing backup counts as infinitely old. Calling this twice
    /// without touching the primary in between copies at most once.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Read`] if the primary file's metadata cannot be
    /// read, or [`FileError::Backup`] if the copy fails.
    pub fn backup(&self) -> Result<BackupOutcome, FileError> {
        let primary_modified = match fs::metadata(&self.path).and_then(|meta| meta.modified()) {
            Ok(modified) => modified,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BackupOutcome::NoSource),
            Err(source) => {
                return Err(FileError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let backup_modified = fs::metadata(&self.backup_path)
            .and_then(|meta| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        if primary_modified <= backup_modified {
            return Ok(BackupOutcome::UpToDate);
        }

        fs::copy(&self.path, &self.backup_path).map_err(|source| FileError::Backup {
            path: self.backup_path.clone(),
            source,
        })?;

        tracing::info!("Backed up {} to {}", self.path.display(), self.backup_path.display());
        Ok(BackupOutcome::Copied)
    }

    fn create_parent(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// Appends `suffix` to the full file name of `path`.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
