//! Locale-aware string ordering for titles and journal names
//!
//! Approximates the Japanese collation the dataset is written in: width and
//! compatibility forms are folded (NFKC), case is ignored, and katakana sorts
//! together with the equivalent hiragana. Strings equal under that folding are
//! ordered by their raw text so the ordering stays total.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// Precomputed sort key; compare keys instead of strings when sorting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: String,
    raw: String,
}

pub fn key(value: &str) -> CollationKey {
    let primary = value
        .nfkc()
        .flat_map(char::to_lowercase)
        .map(fold_kana)
        .collect();
    CollationKey {
        primary,
        raw: value.to_string(),
    }
}

pub fn compare(a: &str, b: &str) -> Ordering {
    key(a).cmp(&key(b))
}

// Katakana block U+30A1..=U+30F6 mirrors hiragana U+3041..=U+3096.
fn fold_kana(c: char) -> char {
    match c {
        '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        _ => c,
    }
}
