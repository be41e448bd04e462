//! Episode record as it appears in the dataset

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One episode. Only the identifier is meaningful when absent; every other
/// field treats `null` or a missing key as its empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "identifier")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(rename = "pubDate", default, deserialize_with = "nullable")]
    pub pub_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub journal: String,
    #[serde(default, deserialize_with = "nullable")]
    pub infection_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub study_design: String,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "string_list")]
    pub pathogens: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub paper_url: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub pubmed_url: String,
}

impl Record {
    /// Identifier used for lookup and self-exclusion: `id`, else `slug`.
    pub fn key(&self) -> &str {
        if self.id.is_empty() { &self.slug } else { &self.id }
    }

    /// Publication time, if `pubDate` holds something parseable.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.pub_date)
    }

    /// Milliseconds since the epoch; undated records sort as the epoch.
    pub fn sort_timestamp(&self) -> i64 {
        self.published().map_or(0, |ts| ts.timestamp_millis())
    }
}

/// Lenient timestamp parsing for the formats seen in feeds and hand-edited
/// datasets: RFC 2822 (RSS `pubDate`), RFC 3339, and plain ISO dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(values.into_iter().flatten().flatten().collect())
}

// Datasets built from feeds use string guids; hand-built ones use numbers.
fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
