//! File lifecycle for configuration documents.
//!
//! This module provides:
//! - Bootstrapping a missing file from bundled default content ([`ConfigFile::ensure_exists`])
//! - Whole-file reads and atomic whole-file writes
//! - Conditional backups to `<file>.bak` ([`ConfigFile::backup`])
//! - Sources of bundled default content ([`ResourceSource`])
//!
//! None of the operations lock the file. Callers that share a path between
//! threads or processes must serialize access themselves.

mod manager;
mod resource;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use manager::ConfigFile;
pub use resource::{DirectoryResources, EmbeddedResources, ResourceSource};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by file lifecycle operations.
#[derive(Debug, Error)]
pub enum FileError {
    /// Failed to create the file or its parent directories.
    #[error("Failed to create '{}': {source}", path.display())]
    Create {
        /// Path that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Failed to read the file.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Failed to write the file.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Failed to copy the file to its backup.
    #[error("Failed to back up to '{}': {source}", path.display())]
    Backup {
        /// Backup path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// What [`ConfigFile::backup`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// The primary file was copied to the backup path.
    Copied,

    /// The backup is already at least as new as the primary file.
    UpToDate,

    /// There is no primary file to back up.
    NoSource,
}

impl BackupOutcome {
    /// Returns `true` if a copy was made.
    #[must_use]
    pub const fn copied(self) -> bool {
        matches!(self, Self::Copied)
    }
}
