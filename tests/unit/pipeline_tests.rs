use episcope::catalog::Catalog;
use episcope::model::{FilterField, FilterState, Record, SortKey};
use episcope::search::{build_predicate, query};
use episcope::test_utils::fixtures::{EpisodeBuilder, sample_episodes};
use episcope::test_utils::{TestCase, keys, run_table_tests};

use crate::fixture_path;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn fixture_catalog() -> Catalog {
    Catalog::load(fixture_path("tests/fixtures/episodes.json")).expect("load fixture dataset")
}

#[test]
fn pipeline_filters_over_sample_dataset() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "unconstrained_new",
            input: FilterState::default(),
            expected: strings(&["ep-1", "ep-2", "ep-3", "ep-5", "ep-4"]),
            should_panic: false,
        },
        TestCase {
            name: "journal_nature",
            input: FilterState::default().with(FilterField::Journal, "Nature"),
            expected: strings(&["ep-2", "ep-4"]),
            should_panic: false,
        },
        TestCase {
            name: "pathogen_membership",
            input: FilterState::default().with(FilterField::Pathogen, "Salmonella"),
            expected: strings(&["ep-1", "ep-4"]),
            should_panic: false,
        },
        TestCase {
            name: "query_and_filter",
            input: FilterState::default()
                .with(FilterField::Query, "salmonella")
                .with(FilterField::Infection, "Typhoid"),
            expected: strings(&["ep-4"]),
            should_panic: false,
        },
        TestCase {
            name: "tag_is_exact",
            input: FilterState::default().with(FilterField::Tag, "one health"),
            expected: strings(&[]),
            should_panic: false,
        },
        TestCase {
            name: "title_sort",
            input: FilterState::default().sorted_by(SortKey::Title),
            expected: strings(&["ep-5", "ep-3", "ep-2", "ep-1", "ep-4"]),
            should_panic: false,
        },
        TestCase {
            name: "journal_sort_keeps_input_order_for_ties",
            input: FilterState::default().sorted_by(SortKey::Journal),
            expected: strings(&["ep-5", "ep-1", "ep-2", "ep-4", "ep-3"]),
            should_panic: false,
        },
    ];

    let records = sample_episodes();
    run_table_tests(cases, |state| {
        let hits = query(&records, &state);
        hits.iter().map(|record| record.id.clone()).collect::<Vec<_>>()
    })
}

#[test]
fn pipeline_five_records_two_in_nature() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.len(), 5);
    let state = FilterState::default().with(FilterField::Journal, "Nature");
    let hits = query(catalog.records(), &state);
    assert_eq!(keys(&hits), vec!["102", "104"]);
}

#[test]
fn pipeline_new_sort_puts_undated_last() {
    let records = vec![
        EpisodeBuilder::new("undated").build(),
        EpisodeBuilder::new("older").published("2023-06-01").build(),
        EpisodeBuilder::new("newer").published("2024-01-01").build(),
    ];
    let hits = query(&records, &FilterState::default());
    assert_eq!(keys(&hits), vec!["newer", "older", "undated"]);
}

#[test]
fn pipeline_exclusion_rejects_mentions() {
    let records = vec![
        EpisodeBuilder::new("a").title("COVID-19 and influenza co-infection").build(),
        EpisodeBuilder::new("b").title("COVID-19 antivirals").build(),
    ];
    let state = FilterState::default().with(FilterField::Query, "covid -influenza");
    assert_eq!(keys(&query(&records, &state)), vec!["b"]);
}

#[test]
fn pipeline_alternatives_and_phrases() {
    let catalog = fixture_catalog();
    let flu_or_covid = build_predicate("covid|influenza");
    let matched: Vec<_> = catalog
        .records()
        .iter()
        .filter(|record| flu_or_covid(*record))
        .map(Record::key)
        .collect();
    assert_eq!(matched, vec!["102", "103"]);

    let phrase = build_predicate("\"acute respiratory\"");
    let split = build_predicate("\"respiratory acute\"");
    let record = catalog.find("102").unwrap();
    assert!(phrase(record));
    assert!(!split(record));
}

#[test]
fn pipeline_multiline_summary_is_searchable() {
    let catalog = fixture_catalog();
    let state = FilterState::default().with(FilterField::Query, "\"backyard flocks\"");
    assert_eq!(keys(&query(catalog.records(), &state)), vec!["101"]);
}

#[test]
fn pipeline_does_not_mutate_input() {
    let records = sample_episodes();
    let before = records.clone();
    let _ = query(&records, &FilterState::default().sorted_by(SortKey::Title));
    assert_eq!(records, before);
}
