//! Shared string normalization.
//!
//! Every reference name, synonym, flag and document goes through [`normalize`]
//! before it is indexed or scanned. Scores are compared numerically across
//! runs, so the exact order of the steps below is part of the contract.

use std::sync::LazyLock;

use regex::Regex;

/// Symbol expansions applied before stop-word stripping
const EXPANSIONS: [(char, &str); 4] = [
    ('&', " and "),
    ('@', " at "),
    ('%', " percent "),
    ('$', " dollar "),
];

/// Stop words removed as whole words, in this order
pub const STOP_WORDS: [&str; 12] = [
    "of", "the", "i", "not", "and", "to", "an", "a", "in", "for", "on", "at",
];

/// Anything that is not an ASCII letter, digit or ASCII whitespace
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9\t\n\x0B\x0C\r ]").expect("NON_WORD is a valid regex")
});

/// Runs of ASCII whitespace, including vertical tab
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\n\x0B\x0C\r ]+").expect("WHITESPACE is a valid regex"));

/// Normalize a string for indexing and matching.
///
/// Lower-cases ASCII letters, expands `& @ % $` into words, strips
/// [`STOP_WORDS`], drops every character that is not an ASCII letter, digit or
/// whitespace, collapses whitespace runs to one space and trims.
///
/// Stop words are stripped with a single non-overlapping pass per word, so
/// `"a a b"` only loses its first `a`.
///
/// ```
/// use entity_locator::core::normalize::normalize;
///
/// assert_eq!(normalize("The Bank of Acme & Co."), "bank acme co");
/// assert_eq!(normalize("  5% Notes\n due 2030 "), "5 percent notes due 2030");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut s = text.to_ascii_lowercase();
    for (symbol, word) in EXPANSIONS {
        if s.contains(symbol) {
            s = s.replace(symbol, word);
        }
    }

    let mut s = format!(" {s} ");
    for word in STOP_WORDS {
        let padded = format!(" {word} ");
        if s.contains(&padded) {
            s = s.replace(&padded, " ");
        }
    }

    let s = NON_WORD.replace_all(&s, "");
    let s = WHITESPACE.replace_all(&s, " ");
    s.trim_matches(' ').to_string()
}

/// Surround normalized text with single spaces so that `contains` and
/// `replace` only hit whole words. The empty string pads to one space.
pub(crate) fn pad(normalized: &str) -> String {
    if normalized.is_empty() {
        " ".to_string()
    } else {
        format!(" {normalized} ")
    }
}

/// Collapse whitespace runs left by whole-word replacement and trim
pub(crate) fn unpad(padded: &str) -> String {
    padded.split_whitespace().collect::<Vec<_>>().join(" ")
}
