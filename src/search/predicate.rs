//! Compile a parsed query into a record predicate

use itertools::Itertools;

use crate::model::Record;
use crate::search::query::{ParsedQuery, parse};

/// Joins fields in the searchable text. Query terms never contain it, so no
/// term can match across a field boundary.
pub const FIELD_SEPARATOR: &str = "\u{1f}";

/// Lowercased searchable text of a record: title, summary, journal,
/// infection type, study design, then every pathogen, topic and tag.
pub fn record_text(record: &Record) -> String {
    [
        &record.title,
        &record.summary,
        &record.journal,
        &record.infection_type,
        &record.study_design,
    ]
    .into_iter()
    .chain(&record.pathogens)
    .chain(&record.topics)
    .chain(&record.tags)
    .map(|field| field.to_lowercase())
    .join(FIELD_SEPARATOR)
}

/// Substring predicate over [`record_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    parsed: ParsedQuery,
}

impl Predicate {
    pub fn parse(raw: &str) -> Self {
        Self::from_parsed(parse(raw))
    }

    pub const fn from_parsed(parsed: ParsedQuery) -> Self {
        Self { parsed }
    }

    pub const fn query(&self) -> &ParsedQuery {
        &self.parsed
    }

    /// True when every record matches.
    pub fn is_universal(&self) -> bool {
        self.parsed.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if self.is_universal() {
            return true;
        }
        self.matches_text(&record_text(record))
    }

    /// Match against already-lowercased text.
    pub fn matches_text(&self, text: &str) -> bool {
        let included = self
            .parsed
            .include_groups
            .iter()
            .all(|group| group.iter().any(|term| text.contains(term.as_str())));
        included
            && !self
                .parsed
                .exclude
                .iter()
                .any(|term| text.contains(term.as_str()))
    }
}

/// Parse `raw` once and return a reusable matcher.
pub fn build_predicate(raw: &str) -> impl Fn(&Record) -> bool + use<> {
    let predicate = Predicate::parse(raw);
    move |record: &Record| predicate.matches(record)
}
