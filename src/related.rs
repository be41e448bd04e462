//! Related-episode scoring
//!
//! A candidate earns points for every attribute it shares with the focal
//! episode. Recency adds a small bonus but never qualifies a candidate on its
//! own. Results carry the shared attributes so the caller can explain them.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Record;

/// Default number of related episodes returned.
pub const DEFAULT_RELATED_LIMIT: usize = 6;

/// Score contributions and recency constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelatedWeights {
    /// Per shared pathogen
    #[serde(rename = "pathogen_weight")]
    pub pathogen: f64,
    /// Per shared topic
    #[serde(rename = "topic_weight")]
    pub topic: f64,
    /// Per shared tag
    #[serde(rename = "tag_weight")]
    pub tag: f64,
    /// Same (non-empty) infection type
    #[serde(rename = "infection_weight")]
    pub infection: f64,
    /// Same (non-empty) journal
    #[serde(rename = "journal_weight")]
    pub journal: f64,
    /// Numerator of `scale / log10(days + offset)`
    pub recency_scale: f64,
    /// Day offset in the recency denominator
    pub recency_offset_days: f64,
}

impl Default for RelatedWeights {
    fn default() -> Self {
        Self {
            pathogen: 3.0,
            topic: 2.0,
            tag: 2.0,
            infection: 2.0,
            journal: 1.0,
            recency_scale: 0.5,
            recency_offset_days: 9.0,
        }
    }
}

/// What a candidate has in common with the focal episode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SharedAttributes {
    pub pathogens: Vec<String>,
    pub topics: Vec<String>,
    pub tags: Vec<String>,
    pub infection: Option<String>,
    pub journal: Option<String>,
}

impl SharedAttributes {
    pub fn is_empty(&self) -> bool {
        self.pathogens.is_empty()
            && self.topics.is_empty()
            && self.tags.is_empty()
            && self.infection.is_none()
            && self.journal.is_none()
    }
}

/// One ranked candidate.
#[derive(Debug, Clone, Serialize)]
pub struct RelatedItem<'a> {
    pub record: &'a Record,
    pub score: f64,
    pub shared: SharedAttributes,
}

/// Attributes of the focal episode that candidates are compared against.
#[derive(Debug)]
pub struct RelatedBasis<'a> {
    focal: &'a Record,
    pathogens: HashSet<&'a str>,
    topics: HashSet<&'a str>,
    tags: HashSet<&'a str>,
}

impl<'a> RelatedBasis<'a> {
    pub fn new(focal: &'a Record) -> Self {
        Self {
            focal,
            pathogens: focal.pathogens.iter().map(String::as_str).collect(),
            topics: focal.topics.iter().map(String::as_str).collect(),
            tags: focal.tags.iter().map(String::as_str).collect(),
        }
    }

    /// The focal episode itself: same identifier, or the same value when it
    /// has none.
    pub fn is_focal(&self, candidate: &Record) -> bool {
        let key = self.focal.key();
        std::ptr::eq(candidate, self.focal) || (!key.is_empty() && candidate.key() == key)
    }

    pub fn shared_with(&self, candidate: &Record) -> SharedAttributes {
        let infection = &self.focal.infection_type;
        let journal = &self.focal.journal;
        SharedAttributes {
            pathogens: intersect(&candidate.pathogens, &self.pathogens),
            topics: intersect(&candidate.topics, &self.topics),
            tags: intersect(&candidate.tags, &self.tags),
            infection: (!infection.is_empty() && candidate.infection_type == *infection)
                .then(|| infection.clone()),
            journal: (!journal.is_empty() && candidate.journal == *journal)
                .then(|| journal.clone()),
        }
    }
}

// Distinct candidate values present in the basis, in candidate order.
fn intersect(values: &[String], basis: &HashSet<&str>) -> Vec<String> {
    values
        .iter()
        .filter(|value| basis.contains(value.as_str()))
        .unique()
        .cloned()
        .collect()
}

/// Ranks a pool of episodes against a focal one.
#[derive(Debug, Clone)]
pub struct RelatedScorer {
    weights: RelatedWeights,
    now: DateTime<Utc>,
}

impl Default for RelatedScorer {
    fn default() -> Self {
        Self::new(RelatedWeights::default())
    }
}

impl RelatedScorer {
    pub fn new(weights: RelatedWeights) -> Self {
        Self {
            weights,
            now: Utc::now(),
        }
    }

    /// Fix the reference time used for the recency bonus.
    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub const fn weights(&self) -> &RelatedWeights {
        &self.weights
    }

    /// Categorical part of the score.
    pub fn attribute_score(&self, shared: &SharedAttributes) -> f64 {
        let w = &self.weights;
        let mut score = count(&shared.pathogens) * w.pathogen
            + count(&shared.topics) * w.topic
            + count(&shared.tags) * w.tag;
        if shared.infection.is_some() {
            score += w.infection;
        }
        if shared.journal.is_some() {
            score += w.journal;
        }
        score
    }

    /// Bonus for recent publication; zero for undated records.
    pub fn recency_bonus(&self, record: &Record) -> f64 {
        let Some(published) = record.published() else {
            return 0.0;
        };
        let age_secs = (self.now - published).num_seconds().max(0);
        #[allow(clippy::cast_precision_loss)]
        let days = age_secs as f64 / 86_400.0;
        let denominator = (days + self.weights.recency_offset_days).log10();
        if denominator > 0.0 {
            self.weights.recency_scale / denominator
        } else {
            0.0
        }
    }

    /// Score one candidate, `None` when it shares nothing with the basis.
    pub fn score(&self, basis: &RelatedBasis<'_>, candidate: &Record) -> Option<(f64, SharedAttributes)> {
        let shared = basis.shared_with(candidate);
        let attribute = self.attribute_score(&shared);
        if attribute <= 0.0 {
            return None;
        }
        Some((attribute + self.recency_bonus(candidate), shared))
    }

    /// Top `limit` candidates from `pool`: score descending, then newest
    /// first, then pool order.
    pub fn rank<'a>(&self, focal: &Record, pool: &'a [Record], limit: usize) -> Vec<RelatedItem<'a>> {
        let basis = RelatedBasis::new(focal);
        let mut scored: Vec<(i64, RelatedItem<'a>)> = pool
            .iter()
            .filter(|candidate| !basis.is_focal(candidate))
            .filter_map(|candidate| {
                self.score(&basis, candidate).map(|(score, shared)| {
                    (
                        candidate.sort_timestamp(),
                        RelatedItem {
                            record: candidate,
                            score,
                            shared,
                        },
                    )
                })
            })
            .collect();

        scored.sort_by(|(ts_a, a), (ts_b, b)| b.score.total_cmp(&a.score).then(ts_b.cmp(ts_a)));

        debug!(
            target: "related",
            focal = focal.key(),
            pool = pool.len(),
            qualified = scored.len(),
            limit,
            "related scoring complete"
        );

        scored.into_iter().take(limit).map(|(_, item)| item).collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn count(values: &[String]) -> f64 {
    values.len() as f64
}

/// Rank `pool` against `focal` with the default weights and the current time.
pub fn related<'a>(focal: &Record, pool: &'a [Record], limit: usize) -> Vec<RelatedItem<'a>> {
    RelatedScorer::default().rank(focal, pool, limit)
}
