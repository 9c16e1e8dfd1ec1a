//! Reversible substitution of characters the YAML engine treats structurally.
//!
//! Comment bodies are stored as plain scalar values while a document is in
//! memory. A handful of characters would change how such a scalar is parsed,
//! so they are swapped for word-like tokens on the way in and restored on the
//! way out.
//!
//! Input that already contains one of the tokens (for example a comment that
//! literally reads `_COLON_`) is not representable and comes back altered.

/// Characters replaced by [`escape`] and the token each becomes.
///
/// No token is a prefix of another, which keeps [`unescape`] unambiguous.
const SUBSTITUTIONS: [(char, &str); 4] = [
    (':', "_COLON_"),
    ('|', "_VERT_"),
    ('-', "_HYPHEN_"),
    (' ', "_SPACE_"),
];

/// Replaces structurally significant characters with their tokens.
///
/// # Example
///
/// ```
/// use albatross::escape::escape;
///
/// assert_eq!(escape(" a: b"), "_SPACE_a_COLON__SPACE_b");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match SUBSTITUTIONS.iter().find(|(raw, _)| *raw == ch) {
            Some((_, token)) => escaped.push_str(token),
            None => escaped.push(ch),
        }
    }
    escaped
}

/// Restores the characters replaced by [`escape`].
///
/// Tokens are matched left to right, so a literal word next to a token
/// (`-COLON` escapes to `_HYPHEN_COLON`) decodes back to what was escaped.
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        let token = SUBSTITUTIONS
            .iter()
            .find(|(_, token)| rest.starts_with(token));
        match token {
            Some((raw, token)) => {
                unescaped.push(*raw);
                rest = &rest[token.len()..];
            }
            None => {
                unescaped.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    unescaped
}
