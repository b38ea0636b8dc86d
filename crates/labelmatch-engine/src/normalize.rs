//! Text normalization shared by the indexer and both resolvers.
//!
//! Every comparison in the engine happens between strings that went through
//! [`normalize`], so catalog text and merchant text meet in the same form:
//! uppercase, accent-free, with `.`/`,` treated as word separators.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalizes free text for exact containment checks.
///
/// Uppercases, strips diacritics via canonical decomposition, turns `.` and
/// `,` into spaces, collapses whitespace runs and trims.
///
/// ```
/// use labelmatch_engine::normalize::normalize;
///
/// assert_eq!(normalize("  Av. Córdoba,  1234 "), "AV CORDOBA 1234");
/// ```
#[must_use]
pub fn normalize(s: &str) -> String {
    let replaced: String = s
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == '.' || c == ',' { ' ' } else { c })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized text into its whitespace-separated tokens.
#[must_use]
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Keeps only the ASCII digits of `s`, in order.
#[must_use]
pub fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Tokens of `normalized` strictly longer than `min_len` characters.
///
/// Short tokens ("DE", "LA", "SAN") appear in too many catalog entries to
/// narrow anything.
#[must_use]
pub(crate) fn long_tokens(normalized: &str, min_len: usize) -> Vec<&str> {
    tokenize(normalized)
        .into_iter()
        .filter(|t| t.chars().count() > min_len)
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
