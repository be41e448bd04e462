use chrono::{TimeZone, Utc};
use episcope::related::{RelatedScorer, RelatedWeights, related};
use episcope::test_utils::fixtures::{EpisodeBuilder, sample_episodes};

fn scorer() -> RelatedScorer {
    RelatedScorer::new(RelatedWeights::default()).at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
}

#[test]
fn related_shared_pathogen_included_nothing_shared_excluded() {
    let records = sample_episodes();
    let focal = &records[0];
    let ranked = scorer().rank(focal, &records, 6);
    let ids: Vec<_> = ranked.iter().map(|item| item.record.id.as_str()).collect();
    assert_eq!(ids, vec!["ep-4"]);
    assert_eq!(ranked[0].shared.pathogens, vec!["Salmonella".to_string()]);
}

#[test]
fn related_tie_broken_by_newest() {
    let focal = EpisodeBuilder::new("f").pathogens(&["Salmonella"]).build();
    let pool = vec![
        EpisodeBuilder::new("jan").pathogens(&["Salmonella"]).published("2024-01-01").build(),
        EpisodeBuilder::new("mar").pathogens(&["Salmonella"]).published("2024-03-01").build(),
    ];
    let no_recency = RelatedScorer::new(RelatedWeights {
        recency_scale: 0.0,
        ..RelatedWeights::default()
    });
    let ranked = no_recency.rank(&focal, &pool, 6);
    let ids: Vec<_> = ranked.iter().map(|item| item.record.id.as_str()).collect();
    assert_eq!(ids, vec!["mar", "jan"]);
    assert!((ranked[0].score - ranked[1].score).abs() < f64::EPSILON);
}

#[test]
fn related_recency_never_outweighs_a_shared_attribute() {
    let focal = EpisodeBuilder::new("f")
        .pathogens(&["Salmonella"])
        .journal("Nature")
        .build();
    let pool = vec![
        EpisodeBuilder::new("fresh-journal").journal("Nature").published("2024-06-01").build(),
        EpisodeBuilder::new("old-pathogen").pathogens(&["Salmonella"]).published("2000-01-01").build(),
    ];
    let ranked = scorer().rank(&focal, &pool, 6);
    let ids: Vec<_> = ranked.iter().map(|item| item.record.id.as_str()).collect();
    assert_eq!(ids, vec!["old-pathogen", "fresh-journal"]);
}

#[test]
fn related_empty_identifier_excludes_only_itself() {
    let focal = EpisodeBuilder::new("").tags(&["x"]).build();
    let twin = focal.clone();
    let pool = vec![focal.clone(), twin];
    let ranked = scorer().rank(&pool[0], &pool, 6);
    assert_eq!(ranked.len(), 1);
    assert!(std::ptr::eq(ranked[0].record, &pool[1]));
}

#[test]
fn related_default_entry_point_uses_limit() {
    let records = sample_episodes();
    let focal = EpisodeBuilder::new("focal")
        .journal("Nature")
        .pathogens(&["Salmonella", "Influenza"])
        .build();
    let ranked = related(&focal, &records, 2);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].record.id, "ep-4");
}
