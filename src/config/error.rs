//! Error types for configuration loading and saving.

use std::path::PathBuf;

use thiserror::Error;

use crate::file::FileError;
use crate::transcode::{InvalidNamespace, MisplacedComment};

/// Error type for configuration operations.
///
/// Failures while loading or saving are always surfaced: silently ignoring
/// them would leave the in-memory document out of step with the file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Creating, reading or writing the file failed.
    #[error(transparent)]
    File(#[from] FileError),

    /// The file is not well-formed YAML once comments are encoded.
    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        /// Path to the config file
        path: PathBuf,
        /// Underlying YAML error
        #[source]
        source: serde_yaml::Error,
    },

    /// A column-0 comment sits inside a nested block of the file.
    #[error("Failed to parse '{}': {source}", path.display())]
    MisplacedComment {
        /// Path to the config file
        path: PathBuf,
        /// Location of the offending comment
        #[source]
        source: MisplacedComment,
    },

    /// The file is valid YAML but its top level is not a mapping.
    #[error("'{}' must contain key/value entries at the top level", path.display())]
    NotAMapping {
        /// Path to the config file
        path: PathBuf,
    },

    /// The document could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// The file name is empty.
    #[error("Invalid file name: must not be empty")]
    InvalidFileName,

    /// The comment namespace is not usable as a key prefix.
    #[error(transparent)]
    InvalidNamespace(#[from] InvalidNamespace),
}

impl ConfigError {
    /// Returns `true` if the error comes from malformed file content.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::MisplacedComment { .. } | Self::NotAMapping { .. }
        )
    }
}
