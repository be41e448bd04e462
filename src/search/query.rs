//! Free-text query language
//!
//! ```text
//! covid "acute respiratory" flu|influenza -pediatric
//! ```
//!
//! - `"..."` is an exact phrase and forms its own AND-group
//! - `a|b` is one AND-group satisfied by either alternative
//! - `-term` excludes records containing `term`
//! - every other whitespace-separated token is its own AND-group
//!
//! There is no escape syntax: a literal `"`, `|` or leading `-` cannot be
//! searched for except through the rules above. An unterminated `"` is an
//! ordinary character.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static PHRASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("valid regex"));

/// Structured form of a raw query string. All terms are lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// Every group must be satisfied; a group is satisfied by any member.
    pub include_groups: Vec<Vec<String>>,
    /// No term may occur.
    pub exclude: Vec<String>,
    /// Phrases, then include terms, in query order. May contain duplicates.
    pub highlight: Vec<String>,
}

impl ParsedQuery {
    /// True when the query constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.include_groups.is_empty() && self.exclude.is_empty()
    }
}

/// Parse a raw search string.
pub fn parse(raw: &str) -> ParsedQuery {
    let normalized = raw.replace('\u{3000}', " ").trim().to_lowercase();
    if normalized.is_empty() {
        return ParsedQuery::default();
    }

    let phrases: Vec<String> = PHRASE_REGEX
        .captures_iter(&normalized)
        .map(|caps| caps[1].trim().to_string())
        .filter(|phrase| !phrase.is_empty())
        .collect();
    let remainder = PHRASE_REGEX.replace_all(&normalized, " ");

    let mut include_groups: Vec<Vec<String>> =
        phrases.iter().map(|phrase| vec![phrase.clone()]).collect();
    let mut highlight = phrases;
    let mut exclude = Vec::new();

    for token in remainder.split_whitespace() {
        if let Some(term) = token.strip_prefix('-').filter(|term| !term.is_empty()) {
            exclude.push(term.to_string());
            continue;
        }
        let group: Vec<String> = token
            .split('|')
            .filter(|alt| !alt.is_empty())
            .map(str::to_string)
            .collect();
        if group.is_empty() {
            continue;
        }
        highlight.extend(group.iter().cloned());
        include_groups.push(group);
    }

    ParsedQuery {
        include_groups,
        exclude,
        highlight,
    }
}
