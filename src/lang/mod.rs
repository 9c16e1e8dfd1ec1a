//! Localized strings backed by per-language configuration files.
//!
//! Language files live in one directory and are named `lang-<code>.yml`,
//! where `<code>` is an ISO 639-3 code resolved from the caller's locale tag
//! ([`language_code`]). Lookups fall back to the file of a fixed fallback
//! language, and finally to a literal error message: a translation gap
//! never fails the caller.

mod locale;
mod manager;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use locale::language_code;
pub use manager::LanguageManager;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors from a single language file lookup.
///
/// [`LanguageManager::localized_string`] recovers from these; they are
/// exposed for callers that want to inspect one file directly.
#[derive(Debug, Error)]
pub enum LangError {
    /// The language file has no string at the requested key.
    #[error("Key '{key}' not found in '{}'", path.display())]
    MissingKey {
        /// The requested key
        key: String,
        /// The language file that was searched
        path: PathBuf,
    },

    /// The language file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
