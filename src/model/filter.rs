//! Filter state supplied by the presentation layer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EpiError;

/// Result ordering. Each variant has exactly one comparator in
/// [`crate::search::pipeline`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest publication first
    #[default]
    New,
    /// Title, ascending
    Title,
    /// Journal name, ascending
    Journal,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Title => "title",
            Self::Journal => "journal",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = EpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "title" => Ok(Self::Title),
            "journal" => Ok(Self::Journal),
            _ => Err(EpiError::InvalidSortKey(s.to_string())),
        }
    }
}

/// One filterable dimension of [`FilterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Infection,
    Journal,
    StudyDesign,
    Pathogen,
    Topic,
    Tag,
    Query,
}

impl FilterField {
    /// Display order for active-filter listings.
    pub const ALL: [Self; 7] = [
        Self::Infection,
        Self::Journal,
        Self::StudyDesign,
        Self::Pathogen,
        Self::Topic,
        Self::Tag,
        Self::Query,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Infection => "infection",
            Self::Journal => "journal",
            Self::StudyDesign => "design",
            Self::Pathogen => "pathogen",
            Self::Topic => "topic",
            Self::Tag => "tag",
            Self::Query => "search",
        }
    }
}

/// A set filter dimension and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    pub field: FilterField,
    pub value: String,
}

/// Everything the user has selected. An empty string means "unset", which
/// imposes no constraint; it never means "match the empty value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub query: String,
    pub infection: String,
    pub journal: String,
    pub study_design: String,
    pub pathogen: String,
    pub topic: String,
    pub tag: String,
    pub sort: SortKey,
}

impl FilterState {
    /// Current value of one dimension, `None` when unset.
    pub fn get(&self, field: FilterField) -> Option<&str> {
        let value = match field {
            FilterField::Infection => &self.infection,
            FilterField::Journal => &self.journal,
            FilterField::StudyDesign => &self.study_design,
            FilterField::Pathogen => &self.pathogen,
            FilterField::Topic => &self.topic,
            FilterField::Tag => &self.tag,
            FilterField::Query => &self.query,
        };
        if value.trim().is_empty() { None } else { Some(value.as_str()) }
    }

    /// Copy with one dimension set to `value`.
    #[must_use]
    pub fn with(&self, field: FilterField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot(field) = value.into();
        next
    }

    /// Copy with one dimension unset.
    #[must_use]
    pub fn clear(&self, field: FilterField) -> Self {
        self.with(field, String::new())
    }

    /// Copy with a different sort key.
    #[must_use]
    pub fn sorted_by(&self, sort: SortKey) -> Self {
        Self { sort, ..self.clone() }
    }

    /// Everything unset, newest first.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// Set dimensions in display order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        FilterField::ALL
            .into_iter()
            .filter_map(|field| {
                self.get(field).map(|value| ActiveFilter {
                    field,
                    value: value.trim().to_string(),
                })
            })
            .collect()
    }

    pub fn is_unconstrained(&self) -> bool {
        FilterField::ALL.into_iter().all(|field| self.get(field).is_none())
    }

    fn slot(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Infection => &mut self.infection,
            FilterField::Journal => &mut self.journal,
            FilterField::StudyDesign => &mut self.study_design,
            FilterField::Pathogen => &mut self.pathogen,
            FilterField::Topic => &mut self.topic,
            FilterField::Tag => &mut self.tag,
            FilterField::Query => &mut self.query,
        }
    }
}
