//! Query normalization.

/// Lowercase one character at a time.
///
/// Every case-insensitive comparison in the crate goes through this, so the
/// matcher and the highlighter always agree on what a match is. Unlike
/// `str::to_lowercase` it has no context rules (a final `Σ` folds to `σ`, not `ς`).
pub fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Trim surrounding whitespace and lowercase.
///
/// Uses Unicode case mapping, which does not depend on the user's locale.
/// Total over all inputs; an empty or blank string normalizes to `""`.
pub fn normalize(raw: &str) -> String {
    fold(raw.trim())
}
