//! Comment-preserving configuration documents.
//!
//! This module provides:
//! - The in-memory document with load/save/backup ([`Configuration`])
//! - Mutable views of nested sections ([`Section`])
//! - Error types ([`ConfigError`])
//!
//! # Paths
//!
//! Values are addressed with `.`-separated paths (`database.pool.size`).
//! Setting a value creates missing parent sections; getting one never does,
//! except for [`Configuration::get_section`], which always hands back a
//! section.
//!
//! # Comments
//!
//! Lines starting with `#` survive a load/modify/save cycle and stay next to
//! the entries they precede. Comments added through
//! [`Configuration::set_with_comment`] land directly above the top-level entry
//! they describe. Blank lines are normalized: one blank line before every
//! comment block that follows an entry, none elsewhere.
//!
//! Indented comments and trailing comments (`key: value # note`) are dropped
//! by the YAML parser and do not survive a save.

mod error;
mod path;
mod section;
mod store;


pub use error::ConfigError;
pub use section::Section;
pub use store::Configuration;
