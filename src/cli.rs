//! CLI argument parsing using clap.
//!
//! Defines the command-line interface of the `albatross` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::defaults::{FALLBACK_LOCALE, NAMESPACE};

/// Albatross: comment-preserving YAML configuration files
///
/// Reads and edits YAML configuration files without losing their
/// full-line comments, backs them up, resolves localized strings and
/// checks for newer releases.
#[derive(Debug, Parser)]
#[command(name = "albatross")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Prefix of the synthetic keys that carry comments
    #[arg(long, global = true, default_value = NAMESPACE)]
    pub namespace: String,

    /// Enable verbose (debug) logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the value at a dotted path
    Get {
        /// Configuration file
        file: PathBuf,

        /// Dotted path of the value (e.g. `server.port`)
        path: String,

        /// Print the value as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// List the top-level keys, comments excluded
    Keys {
        /// Configuration file
        file: PathBuf,
    },

    /// Set a value, optionally with comments, and save the file
    Set {
        /// Configuration file
        file: PathBuf,

        /// Dotted path of the value
        path: String,

        /// New value, parsed as YAML (`42`, `true`, `[a, b]`, text)
        value: String,

        /// Comment line written above the entry (can be specified multiple times)
        #[arg(long = "comment", short = 'c', value_name = "TEXT")]
        comments: Vec<String>,

        /// Back up the file before changing it
        #[arg(long)]
        backup: bool,
    },

    /// Copy the file to `<file>.bak` if it changed since the last backup
    Backup {
        /// Configuration file
        file: PathBuf,
    },

    /// Print a localized string
    Translate {
        /// Locale tag (e.g. `de_DE`, `en-US`)
        locale: String,

        /// Dotted path of the string
        key: String,

        /// Directory holding `lang-<code>.yml` files
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Language code used when the locale has no file or key
        #[arg(long, default_value = FALLBACK_LOCALE)]
        fallback: String,
    },

    /// Compare the running version with the published one
    CheckUpdate {
        /// Endpoint answering with the published version as plain text
        #[arg(long)]
        url: String,

        /// Download page reported when an update is available
        #[arg(long)]
        download: String,

        /// Version to compare against
        #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
        current: String,
    },
}

impl Cli {
    /// Parses CLI arguments from the environment.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Fallible variant of [`parse_from_iter`](Self::parse_from_iter).
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }
}

/// Returns the default language directory, `<config dir>/albatross/lang`.
///
/// `None` if the platform has no per-user configuration directory.
#[must_use]
pub fn default_lang_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("albatross").join("lang"))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
