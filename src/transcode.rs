//! Comment transcoding between on-disk text and parser-safe text.
//!
//! `serde_yaml` discards comments, so before parsing every `#` line is
//! rewritten into an ordinary top-level entry:
//!
//! ```text
//! # Server settings          albatross_COMMENT_0: _SPACE_Server_SPACE_settings
//! host: localhost      =>    host: localhost
//! ```
//!
//! After serializing, those entries are turned back into comment lines.
//! Consecutive comments stay together as one block; a block that follows a
//! regular line is preceded by a blank line.
//!
//! A `#` line directly above an indented line (or a sequence item) belongs
//! to a nested block and cannot be represented this way; encoding rejects it.

use regex::Regex;
use serde_yaml::Value;
use thiserror::Error;

use crate::defaults::{COMMENT_MARKER, COMMENT_PREFIX};
use crate::escape::{escape, unescape};

/// The namespace cannot be used as a comment key prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid comment namespace '{0}': expected ASCII letters, digits, '_' or '-'")]
pub struct InvalidNamespace(pub String);

/// A comment line sits between a key and the indented block that belongs to it.
///
/// Such a comment cannot become a top-level entry without swallowing the
/// block, so encoding refuses it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Comment on line {line} interrupts a nested block; indent it or move it above the enclosing key")]
pub struct MisplacedComment {
    /// 1-based line number of the comment.
    pub line: usize,
}

/// Result of [`CommentTranscoder::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Text safe to hand to the YAML parser.
    pub text: String,
    /// Number of comment lines that were converted.
    pub comment_count: usize,
}

/// Converts comment lines to synthetic entries and back.
///
/// Synthetic keys have the form `<namespace>_COMMENT_<n>`. The namespace
/// keeps them apart from real keys that happen to contain `_COMMENT_`.
#[derive(Debug, Clone)]
pub struct CommentTranscoder {
    namespace: String,
    key_pattern: Regex,
    line_pattern: Regex,
}

impl CommentTranscoder {
    /// Creates a transcoder for the given namespace.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNamespace`] if the namespace is empty, starts with a
    /// `-`, or contains characters other than ASCII letters, digits, `_` and `-`.
    pub fn new(namespace: impl Into<String>) -> Result<Self, InvalidNamespace> {
        let namespace = namespace.into();
        if !is_valid_namespace(&namespace) {
            return Err(InvalidNamespace(namespace));
        }

        let prefix = regex::escape(&format!("{namespace}{COMMENT_MARKER}"));
        let key_pattern = Regex::new(&format!(r"^{prefix}\d+$"))
            .map_err(|_| InvalidNamespace(namespace.clone()))?;
        let line_pattern = Regex::new(&format!(r"^{prefix}\d+:(?: (.*))?$"))
            .map_err(|_| InvalidNamespace(namespace.clone()))?;

        Ok(Self {
            namespace,
            key_pattern,
            line_pattern,
        })
    }

    /// Returns the namespace used for synthetic keys.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Builds the synthetic key for the comment with the given index.
    #[must_use]
    pub fn comment_key(&self, index: usize) -> String {
        format!("{}{COMMENT_MARKER}{index}", self.namespace)
    }

    /// Returns `true` if `key` is a synthetic comment key of this namespace.
    #[must_use]
    pub fn is_comment_key(&self, key: &str) -> bool {
        self.key_pattern.is_match(key)
    }

    /// Rewrites comment lines of `raw` into synthetic entries.
    ///
    /// Only lines whose first character is `#` are comments. Every other line
    /// is passed through untouched, so the relative order of comments and
    /// entries is kept.
    ///
    /// # Errors
    ///
    /// Returns [`MisplacedComment`] if the first line after a comment block
    /// (blank lines aside) is indented or a sequence item, i.e. the comment
    /// sits inside a nested block.
    pub fn encode(&self, raw: &str) -> Result<Encoded, MisplacedComment> {
        let lines: Vec<&str> = raw.lines().collect();
        let mut text = String::with_capacity(raw.len());
        let mut comment_count = 0;

        for (index, line) in lines.iter().enumerate() {
            if let Some(body) = line.strip_prefix(COMMENT_PREFIX) {
                if continues_block(&lines[index + 1..]) {
                    return Err(MisplacedComment { line: index + 1 });
                }
                text.push_str(&self.comment_key(comment_count));
                text.push_str(": ");
                text.push_str(&scalar_text(&escape(body)));
                comment_count += 1;
            } else {
                text.push_str(line);
            }
            text.push('\n');
        }

        Ok(Encoded {
            text,
            comment_count,
        })
    }

    /// Turns synthetic entries in serialized YAML back into comment lines.
    ///
    /// A blank line is inserted in front of a comment block unless the
    /// block opens the file. Lines inside a block are kept contiguous.
    #[must_use]
    pub fn decode(&self, serialized: &str) -> String {
        let mut decoded = String::with_capacity(serialized.len());
        let mut previous_was_comment = false;

        for line in serialized.lines() {
            if let Some(body) = self.comment_body(line) {
                if !previous_was_comment && !decoded.is_empty() {
                    decoded.push('\n');
                }
                decoded.push(COMMENT_PREFIX);
                decoded.push_str(&unescape(&body));
                previous_was_comment = true;
            } else {
                decoded.push_str(line);
                previous_was_comment = false;
            }
            decoded.push('\n');
        }

        decoded
    }

    /// Extracts the still-escaped comment text from a synthetic entry line.
    fn comment_body(&self, line: &str) -> Option<String> {
        let captures = self.line_pattern.captures(line)?;
        let raw = captures.get(1).map_or("", |m| m.as_str());
        Some(unquote(raw))
    }
}

/// Returns `true` if the next content line after a comment belongs to a
/// nested block rather than starting a top-level entry.
fn continues_block(rest: &[&str]) -> bool {
    rest.iter()
        .find(|line| !line.trim().is_empty() && !line.starts_with(COMMENT_PREFIX))
        .is_some_and(|line| {
            line.starts_with([' ', '\t']) || *line == "-" || line.starts_with("- ")
        })
}

fn is_valid_namespace(namespace: &str) -> bool {
    let mut chars = namespace.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphanumeric() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Renders escaped comment text as a YAML scalar that parses back to itself.
///
/// Plain style is used whenever possible; text YAML would read as something
/// else (a number, a flow sequence, an alias, nothing) is single-quoted.
fn scalar_text(escaped: &str) -> String {
    let reads_back = matches!(
        serde_yaml::from_str::<Value>(escaped),
        Ok(Value::String(ref parsed)) if parsed == escaped
    );
    if reads_back {
        escaped.to_owned()
    } else {
        format!("'{}'", escaped.replace('\'', "''"))
    }
}

/// Strips the quoting the serializer may have applied to a comment scalar.
fn unquote(raw: &str) -> String {
    if raw.starts_with(['\'', '"']) {
        if let Ok(Value::String(text)) = serde_yaml::from_str::<Value>(raw) {
            return text;
        }
    }
    raw.to_owned()
}

#[cfg(test)]
#[path = "transcode_tests.rs"]
mod tests;
