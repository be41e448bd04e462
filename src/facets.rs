//! Distinct filter values present in a dataset

use itertools::Itertools;
use serde::Serialize;

use crate::model::Record;
use crate::search::collate;

/// Selectable values per filter dimension, each list collated ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub infections: Vec<String>,
    pub journals: Vec<String>,
    pub study_designs: Vec<String>,
    pub pathogens: Vec<String>,
    pub topics: Vec<String>,
    pub tags: Vec<String>,
}

impl Facets {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            infections: distinct(records.iter().map(|r| r.infection_type.as_str())),
            journals: distinct(records.iter().map(|r| r.journal.as_str())),
            study_designs: distinct(records.iter().map(|r| r.study_design.as_str())),
            pathogens: distinct(records.iter().flat_map(|r| &r.pathogens).map(String::as_str)),
            topics: distinct(records.iter().flat_map(|r| &r.topics).map(String::as_str)),
            tags: distinct(records.iter().flat_map(|r| &r.tags).map(String::as_str)),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.trim().is_empty())
        .unique()
        .map(|value| (collate::key(value), value.to_string()))
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, value)| value)
        .collect()
}
