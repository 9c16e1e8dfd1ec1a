//! Resolution of localized strings with fallback.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Configuration;
use crate::defaults::{NAMESPACE, UNRECOVERABLE_LANG_ERROR, lang_file_name};
use crate::file::ResourceSource;

use super::{LangError, language_code};

/// Looks up strings in the language file matching a locale.
///
/// Every lookup reloads the file, so edits on disk are picked up without a
/// restart.
#[derive(Debug, Clone)]
pub struct LanguageManager {
    lang_dir: PathBuf,
    fallback_code: String,
    namespace: String,
    resources: Option<Arc<dyn ResourceSource>>,
}

impl LanguageManager {
    /// Creates a manager for the language files in `lang_dir`.
    ///
    /// `fallback_code` names the language used when a locale is unknown, has
    /// no file, or lacks a key (for example `eng`).
    #[must_use]
    pub fn new(lang_dir: impl Into<PathBuf>, fallback_code: impl Into<String>) -> Self {
        Self {
            lang_dir: lang_dir.into(),
            fallback_code: fallback_code.into(),
            namespace: NAMESPACE.to_owned(),
            resources: None,
        }
    }

    /// Sets the comment namespace used when opening language files.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Bootstraps missing language files from `source`.
    ///
    /// Resources are looked up by file name (`lang-eng.yml`).
    #[must_use]
    pub fn with_resources(mut self, source: Arc<dyn ResourceSource>) -> Self {
        self.resources = Some(source);
        self
    }

    /// Returns the directory holding the language files.
    #[must_use]
    pub fn lang_dir(&self) -> &Path {
        &self.lang_dir
    }

    /// Returns the fallback language code.
    #[must_use]
    pub fn fallback_code(&self) -> &str {
        &self.fallback_code
    }

    /// Returns the path of the language file for `code`.
    #[must_use]
    pub fn lang_file_path(&self, code: &str) -> PathBuf {
        self.lang_dir.join(lang_file_name(code))
    }

    /// Returns the language code whose file serves `locale_tag`.
    ///
    /// Unknown tags and languages without a file (on disk or among the
    /// resources) resolve to the fallback code.
    #[must_use]
    pub fn resolve_code(&self, locale_tag: &str) -> &str {
        match language_code(locale_tag) {
            Some(code) if self.has_language(code) => code,
            Some(code) => {
                tracing::debug!("No language file for '{code}', using '{}'", self.fallback_code);
                &self.fallback_code
            }
            None => {
                tracing::debug!("Unknown locale '{locale_tag}', using '{}'", self.fallback_code);
                &self.fallback_code
            }
        }
    }

    /// Returns the string at `key` for `locale_tag`.
    ///
    /// Falls back to the fallback language when the localized file cannot be
    /// loaded or lacks the key. If the fallback fails too, the failure is
    /// logged and a fixed error message is returned instead.
    #[must_use]
    pub fn localized_string(&self, key: &str, locale_tag: &str) -> String {
        let code = self.resolve_code(locale_tag);
        let localized = match self.lookup(code, key) {
            Ok(value) => return value,
            Err(e) => e,
        };

        if code == self.fallback_code {
            tracing::error!("Unable to locate key \"{key}\" in language file: {localized}");
            return UNRECOVERABLE_LANG_ERROR.to_owned();
        }

        tracing::warn!("{localized}; trying '{}'", self.fallback_code);
        match self.lookup(&self.fallback_code, key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(
                    "Unable to locate key \"{key}\" in fallback or localized language file: {e}"
                );
                UNRECOVERABLE_LANG_ERROR.to_owned()
            }
        }
    }

    /// Loads the language file for `code` and returns the string at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LangError::Config`] if the file cannot be loaded and
    /// [`LangError::MissingKey`] if it has no scalar at `key`.
    pub fn lookup(&self, code: &str, key: &str) -> Result<String, LangError> {
        let mut file = Configuration::in_dir(&self.lang_dir, &lang_file_name(code), &self.namespace)?;
        if let Some(source) = &self.resources {
            file = file.with_resources(Arc::clone(source));
        }
        file.load()?;

        file.get_string(key).ok_or_else(|| LangError::MissingKey {
            key: key.to_owned(),
            path: file.path().to_path_buf(),
        })
    }

    fn has_language(&self, code: &str) -> bool {
        self.lang_file_path(code).is_file()
            || self
                .resources
                .as_ref()
                .is_some_and(|source| source.open(&lang_file_name(code)).is_some())
    }
}
