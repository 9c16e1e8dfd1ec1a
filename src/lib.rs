//! Albatross: comment-preserving YAML configuration files
//!
//! A library for YAML configuration files whose full-line comments survive
//! a load/edit/save cycle, with bootstrap from bundled defaults, timestamped
//! backups, localized string lookup and a best-effort update check.

pub mod cli;
pub mod config;
pub mod defaults;
pub mod escape;
pub mod file;
pub mod lang;
pub mod transcode;
pub mod update;
