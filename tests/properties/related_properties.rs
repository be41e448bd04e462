use proptest::prelude::*;

use episcope::related::{RelatedScorer, RelatedWeights};
use episcope::test_utils::fixtures::EpisodeBuilder;

fn arb_values() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]", 0..3)
}

proptest! {
    #[test]
    fn test_related_items_share_something(
        focal_tags in arb_values(),
        pool_tags in prop::collection::vec(arb_values(), 0..10),
        limit in 0usize..8,
    ) {
        let focal_refs: Vec<&str> = focal_tags.iter().map(String::as_str).collect();
        let focal = EpisodeBuilder::new("focal").tags(&focal_refs).build();
        let pool: Vec<_> = pool_tags
            .iter()
            .enumerate()
            .map(|(index, tags)| {
                let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
                EpisodeBuilder::new(&format!("c{index}")).tags(&refs).build()
            })
            .collect();

        let ranked = RelatedScorer::new(RelatedWeights::default()).rank(&focal, &pool, limit);
        prop_assert!(ranked.len() <= limit);
        prop_assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
        for item in &ranked {
            prop_assert!(!item.shared.is_empty());
            prop_assert!(item.record.id != "focal");
        }
    }
}
