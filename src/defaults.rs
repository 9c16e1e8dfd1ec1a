//! Default values and fixed strings.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Default namespace prefixed to synthetic comment keys.
pub const NAMESPACE: &str = "albatross";

/// Infix between the namespace and the counter of a synthetic comment key.
pub const COMMENT_MARKER: &str = "_COMMENT_";

/// Character that starts a comment line on disk.
pub const COMMENT_PREFIX: char = '#';

/// Suffix appended to a file name to form its backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Suffix appended to a file name for the temporary file of an atomic write.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Separator between the segments of a configuration path.
pub const PATH_SEPARATOR: char = '.';

/// Prefix of every language file name (`lang-eng.yml`).
pub const LANG_FILE_PREFIX: &str = "lang-";

/// Extension of every language file name.
pub const LANG_FILE_EXTENSION: &str = ".yml";

/// Language code used when a locale cannot be resolved.
pub const FALLBACK_LOCALE: &str = "eng";

/// Message returned when a key is missing from both the localized and fallback files.
pub const UNRECOVERABLE_LANG_ERROR: &str =
    "There was an unrecoverable error while reading from the language file";

/// Endpoint template for Spigot's legacy version API.
pub const SPIGOT_VERSION_ENDPOINT: &str = "https://api.spigotmc.org/legacy/update.php";

/// Builds the file name of the language file for a language code.
#[must_use]
pub fn lang_file_name(code: &str) -> String {
    format!("{LANG_FILE_PREFIX}{code}{LANG_FILE_EXTENSION}")
}
