//! Episode card and detail rendering
//!
//! Human mode prints cards with highlighted query terms; robot mode emits
//! [`EpisodeEntry`] values.

use console::style;
use serde::Serialize;

use crate::cli::output::HumanLayout;
use crate::highlight::Highlighter;
use crate::model::Record;
use crate::related::{RelatedItem, SharedAttributes};

/// Serializable episode for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeEntry<'a> {
    #[serde(flatten)]
    pub record: &'a Record,
    /// Normalized publication time, when parseable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

impl<'a> From<&'a Record> for EpisodeEntry<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            record,
            published: record.published().map(|ts| ts.to_rfc3339()),
        }
    }
}

/// Serializable related item for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct RelatedEntry<'a> {
    pub episode: EpisodeEntry<'a>,
    pub score: f64,
    pub shared: &'a SharedAttributes,
}

impl<'a, 'r: 'a> From<&'a RelatedItem<'r>> for RelatedEntry<'a> {
    fn from(item: &'a RelatedItem<'r>) -> Self {
        Self {
            episode: EpisodeEntry::from(item.record),
            score: item.score,
            shared: &item.shared,
        }
    }
}

pub fn date_label(record: &Record) -> String {
    record
        .published()
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn or_unknown<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

/// `[infection] [journal] [design] date`
pub fn meta_line(record: &Record) -> String {
    let mut parts = vec![
        format!("[{}]", or_unknown(&record.infection_type, "other")),
        format!("[{}]", or_unknown(&record.journal, "journal unknown")),
        format!("[{}]", or_unknown(&record.study_design, "design unknown")),
    ];
    let date = date_label(record);
    if !date.is_empty() {
        parts.push(date);
    }
    parts.join(" ")
}

/// Pathogens, topics and `#tags` as one line; empty when the record has none.
pub fn pills(record: &Record) -> String {
    let pathogens = record.pathogens.iter().map(|p| style(p).blue().to_string());
    let topics = record.topics.iter().map(|t| style(t).green().to_string());
    let tags = record
        .tags
        .iter()
        .map(|t| style(format!("#{t}")).magenta().to_string());
    pathogens.chain(topics).chain(tags).collect::<Vec<_>>().join(" ")
}

fn mark(highlighter: &Highlighter, text: &str) -> String {
    highlighter.apply_with(text, |matched| style(matched).yellow().bold().to_string())
}

/// Compact card for result lists.
pub fn render_card(layout: &mut HumanLayout, record: &Record, highlighter: &Highlighter) {
    let title = or_unknown(&record.title, "(untitled)");
    layout.push_line(format!(
        "{} {}",
        style(mark(highlighter, title)).bold(),
        style(format!("({})", record.key())).dim()
    ));
    layout.push_line(format!("  {}", meta_line(record)));
    let pills = pills(record);
    if !pills.is_empty() {
        layout.push_line(format!("  {pills}"));
    }
    if !record.url.is_empty() {
        layout.push_line(format!("  {}", style(&record.url).underlined()));
    }
}

/// Full detail view for one record.
pub fn render_detail(layout: &mut HumanLayout, record: &Record) {
    layout.title(or_unknown(&record.title, "(untitled)"));
    layout
        .kv("id", record.key())
        .kv("published", &date_label(record))
        .kv("infection", &record.infection_type)
        .kv("journal", &record.journal)
        .kv("design", &record.study_design)
        .kv("episode", &record.url)
        .kv("paper", &record.paper_url)
        .kv("pubmed", &record.pubmed_url);
    let pills = pills(record);
    if !pills.is_empty() {
        layout.blank().push_line(pills);
    }
    if !record.summary.is_empty() {
        layout.blank();
        for line in record.summary.lines() {
            layout.push_line(line);
        }
    }
}

/// "shared: pathogen Salmonella, tag One Health" explanation.
pub fn shared_summary(shared: &SharedAttributes) -> String {
    let mut parts = Vec::new();
    parts.extend(shared.pathogens.iter().map(|p| format!("pathogen {p}")));
    parts.extend(shared.topics.iter().map(|t| format!("topic {t}")));
    parts.extend(shared.tags.iter().map(|t| format!("tag #{t}")));
    if let Some(infection) = &shared.infection {
        parts.push(format!("infection {infection}"));
    }
    if let Some(journal) = &shared.journal {
        parts.push(format!("journal {journal}"));
    }
    parts.join(", ")
}

/// Related list; callers skip this entirely when `items` is empty.
pub fn render_related(layout: &mut HumanLayout, items: &[RelatedItem<'_>]) {
    layout.section("Related episodes");
    for item in items {
        layout.bullet(&format!(
            "{} {} {}",
            or_unknown(&item.record.title, "(untitled)"),
            style(format!("({})", item.record.key())).dim(),
            style(format!("{:.2}", item.score)).cyan()
        ));
        layout.push_line(format!("  shared: {}", shared_summary(&item.shared)));
    }
}
