use proptest::prelude::*;

use episcope::model::FilterState;
use episcope::search::{Predicate, parse, query, record_text};
use episcope::test_utils::fixtures::EpisodeBuilder;

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec("(-?[a-e]{1,4}(\\|[a-e]{1,3})?|\"[a-e ]{1,6}\")", 0..5)
        .prop_map(|tokens| tokens.join(" "))
}

proptest! {
    #[test]
    fn test_blank_query_is_universal(raw in "[ \t\u{3000}]{0,6}", title in ".{0,30}") {
        let predicate = Predicate::parse(&raw);
        prop_assert!(predicate.is_universal());
        let record = EpisodeBuilder::new("1").title(&title).build();
        prop_assert!(predicate.matches(&record));
    }

    #[test]
    fn test_match_implies_highlight_term(raw in arb_query(), title in "[a-e ]{0,24}", summary in "[a-e ]{0,24}") {
        let record = EpisodeBuilder::new("1").title(&title).summary(&summary).build();
        let predicate = Predicate::parse(&raw);
        if predicate.matches(&record) && !predicate.query().include_groups.is_empty() {
            let text = record_text(&record);
            prop_assert!(predicate.query().highlight.iter().any(|term| text.contains(term.as_str())));
        }
    }

    #[test]
    fn test_exclusion_always_rejects(term in "[a-z]{1,6}", before in "[a-z ]{0,10}", after in "[a-z ]{0,10}") {
        let title = format!("{before}{}{after}", term.to_uppercase());
        let record = EpisodeBuilder::new("1").title(&title).build();
        let predicate = Predicate::parse(&format!("{before} -{term}"));
        prop_assert!(!predicate.matches(&record));
    }

    #[test]
    fn test_any_alternative_satisfies_group(term in "[a-z]{1,6}", other in "[0-9]{1,4}") {
        let record = EpisodeBuilder::new("1").summary(&format!("about {term} only")).build();
        let predicate = Predicate::parse(&format!("{other}|{term}"));
        prop_assert!(predicate.matches(&record));
    }

    #[test]
    fn test_parse_never_keeps_empty_terms(raw in ".{0,40}") {
        let parsed = parse(&raw);
        prop_assert!(parsed.include_groups.iter().all(|group| !group.is_empty()));
        prop_assert!(parsed.include_groups.iter().flatten().all(|term| !term.is_empty()));
        prop_assert!(parsed.exclude.iter().all(|term| !term.is_empty()));
    }

    #[test]
    fn test_unconstrained_state_returns_everything(dates in prop::collection::vec(prop::option::of(2000u32..2030u32), 0..12)) {
        let records: Vec<_> = dates
            .iter()
            .enumerate()
            .map(|(index, year)| {
                let builder = EpisodeBuilder::new(&index.to_string());
                match year {
                    Some(year) => builder.published(&format!("{year}-01-01")).build(),
                    None => builder.build(),
                }
            })
            .collect();
        let hits = query(&records, &FilterState::default());
        prop_assert_eq!(hits.len(), records.len());
        prop_assert!(hits.windows(2).all(|pair| pair[0].sort_timestamp() >= pair[1].sort_timestamp()));
    }
}
