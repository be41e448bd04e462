//! Play-count ranking
//!
//! The ranking file is exported from the podcast host and only knows episode
//! titles, so each row is matched back to a dataset record by fuzzy title
//! comparison before it can link to a detail view.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::error::{EpiError, Result};
use crate::model::Record;

pub const DEFAULT_CHART_SIZE: usize = 20;
pub const DEFAULT_MIN_BAR_PERCENT: u32 = 5;
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.2;
pub const DEFAULT_PREFIX_BONUS: f64 = 0.1;
pub const DEFAULT_PREFIX_CHARS: usize = 20;

/// One row of the ranking export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRow {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub plays: u64,
    /// Host-assigned rank; rows without one sort last.
    #[serde(default)]
    pub rank: Option<u64>,
    #[serde(default, deserialize_with = "nullable")]
    pub uri: String,
}

fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read the ranking file. A missing file is an empty ranking.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<PlayRow>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(target: "ranking", path = %path.display(), "ranking file not found");
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| EpiError::Dataset {
        path: path.to_path_buf(),
        message: format!("parse failed: {err}"),
    })
}

/// Rank ascending (unranked last), then plays descending. Stable.
pub fn order_rows(rows: &mut [PlayRow]) {
    rows.sort_by_key(|row| (row.rank.unwrap_or(u64::MAX), std::cmp::Reverse(row.plays)));
}

/// Lowercase, NFKC-fold, keep only letters, numbers and single spaces.
pub fn normalize_title(title: &str) -> String {
    let folded: String = title
        .nfkc()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = a.intersection(b).count() as f64 / union as f64;
    ratio
}

/// Tunables for [`TitleMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Minimum score for a match
    pub threshold: f64,
    /// Added when the record title starts with the query prefix
    pub prefix_bonus: f64,
    /// Query prefix length, in characters
    pub prefix_chars: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            prefix_bonus: DEFAULT_PREFIX_BONUS,
            prefix_chars: DEFAULT_PREFIX_CHARS,
        }
    }
}

#[derive(Debug, Clone)]
struct IndexedTitle {
    key: String,
    normalized: String,
}

/// Finds the record a free-form title most likely refers to.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    titles: Vec<IndexedTitle>,
    settings: MatchSettings,
}

impl TitleMatcher {
    pub fn new(records: &[Record]) -> Self {
        Self::with_settings(records, MatchSettings::default())
    }

    pub fn with_settings(records: &[Record], settings: MatchSettings) -> Self {
        let titles = records
            .iter()
            .filter(|record| !record.key().is_empty())
            .map(|record| IndexedTitle {
                key: record.key().to_string(),
                normalized: normalize_title(&record.title),
            })
            .collect();
        Self { titles, settings }
    }

    /// Identifier of the best-scoring record, if it clears the threshold.
    pub fn find_key(&self, title: &str) -> Option<&str> {
        let normalized = normalize_title(title);
        let prefix: String = normalized.chars().take(self.settings.prefix_chars).collect();
        let tokens: HashSet<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();

        let mut best: Option<(&str, f64)> = None;
        for indexed in &self.titles {
            let mut score = 0.0;
            if indexed.normalized.starts_with(&prefix) {
                score += self.settings.prefix_bonus;
            }
            let candidate: HashSet<&str> = indexed
                .normalized
                .split(' ')
                .filter(|t| !t.is_empty())
                .collect();
            score += jaccard(&tokens, &candidate);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((indexed.key.as_str(), score));
            }
        }

        best.filter(|(_, score)| *score >= self.settings.threshold)
            .map(|(key, _)| key)
    }
}

/// Where a chart entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum ChartLink {
    /// A record in the dataset, by identifier
    Detail(String),
    /// The row's own URI (may be empty)
    External(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEntry {
    /// 1-based
    pub position: usize,
    pub title: String,
    pub plays: u64,
    pub bar_percent: u32,
    pub link: ChartLink,
}

/// Top `top` rows with bar widths relative to the most-played row.
pub fn chart(rows: &[PlayRow], matcher: &TitleMatcher, top: usize, min_bar_percent: u32) -> Vec<ChartEntry> {
    let top_rows = &rows[..rows.len().min(top)];
    let max_plays = top_rows.iter().map(|row| row.plays).max().unwrap_or(0).max(1);

    let entries: Vec<ChartEntry> = top_rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let link = matcher.find_key(&row.title).map_or_else(
                || ChartLink::External(row.uri.clone()),
                |key| ChartLink::Detail(key.to_string()),
            );
            ChartEntry {
                position: index + 1,
                title: row.title.clone(),
                plays: row.plays,
                bar_percent: bar_percent(row.plays, max_plays, min_bar_percent),
                link,
            }
        })
        .collect();

    debug!(
        target: "ranking",
        rows = rows.len(),
        shown = entries.len(),
        linked = entries.iter().filter(|e| matches!(e.link, ChartLink::Detail(_))).count(),
        "chart built"
    );
    entries
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar_percent(plays: u64, max_plays: u64, min_percent: u32) -> u32 {
    let percent = (plays as f64 / max_plays as f64 * 100.0).round() as u32;
    percent.max(min_percent)
}
