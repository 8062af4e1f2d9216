//! Text normalization for keyword matching.
//!
//! Pipeline: raw input → case fold → NFD decomposition → strip combining
//! diacritical marks. "Générer" and "generer" become the same string, so
//! every lexicon table stores its entries in de-accented lowercase form.
//!
//! All operations are pure string transforms with no shared state.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a raw message: lowercase, then strip diacritics by NFD
/// decomposition followed by removal of combining marks.
///
/// Total function — empty input yields an empty string. Punctuation and
/// apostrophes are preserved ("aujourd'hui" keeps its apostrophe).
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Check whether `text` contains at least one of `phrases` as a substring.
///
/// This is the membership test behind every keyword rule in the crate:
/// intent rules, vacation types, periods, relative dates, sentiment.
/// Both sides are expected to already be normalized.
pub fn contains_any<S: AsRef<str>>(text: &str, phrases: &[S]) -> bool {
    if text.is_empty() {
        return false;
    }
    phrases.iter().any(|p| text.contains(p.as_ref()))
}
