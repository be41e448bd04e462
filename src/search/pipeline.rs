//! Filter and sort the record set for one filter state

use std::cmp::Reverse;

use tracing::debug;

use crate::model::{FilterField, FilterState, Record, SortKey};
use crate::search::collate;
use crate::search::predicate::Predicate;

/// Records matching every set dimension of `state`, ordered by its sort key.
///
/// The input slice is never reordered. Sorting is stable, so records with
/// equal keys keep their input order.
pub fn query<'a>(records: &'a [Record], state: &FilterState) -> Vec<&'a Record> {
    let predicate = Predicate::parse(&state.query);
    let mut hits: Vec<&Record> = records
        .iter()
        .filter(|record| matches_filters(record, state) && predicate.matches(record))
        .collect();
    sort_records(&mut hits, state.sort);

    debug!(
        target: "search",
        total = records.len(),
        hits = hits.len(),
        sort = %state.sort,
        universal = predicate.is_universal(),
        "query complete"
    );
    hits
}

/// Categorical equality and array membership checks only.
pub fn matches_filters(record: &Record, state: &FilterState) -> bool {
    equals(&record.infection_type, state.get(FilterField::Infection))
        && equals(&record.journal, state.get(FilterField::Journal))
        && equals(&record.study_design, state.get(FilterField::StudyDesign))
        && contains(&record.pathogens, state.get(FilterField::Pathogen))
        && contains(&record.topics, state.get(FilterField::Topic))
        && contains(&record.tags, state.get(FilterField::Tag))
}

pub fn sort_records(records: &mut [&Record], sort: SortKey) {
    match sort {
        SortKey::New => records.sort_by_cached_key(|record| Reverse(record.sort_timestamp())),
        SortKey::Title => records.sort_by_cached_key(|record| collate::key(&record.title)),
        SortKey::Journal => records.sort_by_cached_key(|record| collate::key(&record.journal)),
    }
}

fn equals(value: &str, filter: Option<&str>) -> bool {
    filter.is_none_or(|wanted| value == wanted)
}

fn contains(values: &[String], filter: Option<&str>) -> bool {
    filter.is_none_or(|wanted| values.iter().any(|value| value == wanted))
}
