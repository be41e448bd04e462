//! Mark query terms in display text
//!
//! Terms come straight from user input, so they are always passed through
//! `regex::escape` before being compiled.

use std::collections::HashSet;
use std::ops::Range;

use regex::{Regex, RegexBuilder};

/// Drop empty and repeated terms, keeping first-seen order.
pub fn dedup_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    terms
        .iter()
        .map(|term| term.as_ref().trim())
        .filter(|term| !term.is_empty())
        .filter(|term| seen.insert(term.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Case-insensitive matcher for a fixed set of terms.
#[derive(Debug, Clone)]
pub struct Highlighter {
    regex: Option<Regex>,
}

impl Highlighter {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Self {
        let mut terms = dedup_terms(terms);
        if terms.is_empty() {
            return Self { regex: None };
        }
        // Longest first so "covid-19" wins over "covid" at the same offset.
        terms.sort_by_key(|term| std::cmp::Reverse(term.chars().count()));
        let pattern = terms.iter().map(|term| regex::escape(term)).collect::<Vec<_>>().join("|");
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .ok();
        Self { regex }
    }

    pub const fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// Byte ranges of non-overlapping matches, left to right.
    pub fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex
            .as_ref()
            .map(|regex| regex.find_iter(text).map(|m| m.range()).collect())
            .unwrap_or_default()
    }

    /// Wrap every match in `open` / `close`.
    pub fn apply(&self, text: &str, open: &str, close: &str) -> String {
        self.apply_with(text, |matched| format!("{open}{matched}{close}"))
    }

    /// Replace every match with `mark(matched)`.
    pub fn apply_with(&self, text: &str, mark: impl Fn(&str) -> String) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for span in self.find_spans(text) {
            out.push_str(&text[last..span.start]);
            out.push_str(&mark(&text[span.clone()]));
            last = span.end;
        }
        out.push_str(&text[last..]);
        out
    }
}
