//! Property-based tests for result ranking invariants.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use classfinder::search::{
    ClassMatch, CuratedVendorSet, MatchKind, RankingPolicy, UsageCatalog, match_kind,
};

const CURATED: &str = "azure-core";

fn arb_kind() -> impl Strategy<Value = MatchKind> {
    prop_oneof![Just(MatchKind::Prefix), Just(MatchKind::Fuzzy)]
}

fn arb_artifact() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z]{2,6}".prop_map(|s| format!("lib-{s}")),
        1 => Just(CURATED.to_string()),
    ]
}

/// Candidates with unique fully-qualified names plus a usage catalog.
fn arb_candidates() -> impl Strategy<Value = (Vec<ClassMatch>, UsageCatalog)> {
    prop::collection::vec(
        (
            "[a-z]{1,3}",
            "[A-Z][a-zA-Z]{0,8}",
            arb_artifact(),
            arb_kind(),
            prop_oneof![Just(0u64), 0u64..2000, Just(1000u64), 1000u64..100_000],
        ),
        0..40,
    )
    .prop_map(|entries| {
        let mut by_fqn = BTreeMap::new();
        let mut usage = Vec::new();
        for (package, name, artifact, kind, count) in entries {
            let fqn = format!("{package}.{name}");
            usage.push((format!("g:{artifact}"), count));
            by_fqn
                .entry(fqn.clone())
                .or_insert_with(|| ClassMatch::new("g", artifact, "1", fqn, kind));
        }
        (by_fqn.into_values().collect(), usage.into_iter().collect())
    })
}

fn policy() -> RankingPolicy {
    RankingPolicy {
        curated: CuratedVendorSet::new([CURATED]),
        ..RankingPolicy::default()
    }
}

proptest! {
    #[test]
    fn fqns_are_pairwise_distinct((candidates, usage) in arb_candidates()) {
        let results = policy().rank(candidates, &usage);
        let unique: HashSet<_> = results.iter().map(|r| &r.fully_qualified_class_name).collect();
        prop_assert_eq!(unique.len(), results.len());
    }

    #[test]
    fn fuzzy_survivors_are_popular((candidates, usage) in arb_candidates()) {
        let policy = policy();
        for r in policy.rank(candidates, &usage) {
            if r.match_kind == MatchKind::Fuzzy {
                prop_assert!(r.usage_score >= policy.fuzzy_usage_floor);
            }
        }
    }

    #[test]
    fn usage_comes_from_catalog((candidates, usage) in arb_candidates()) {
        for r in policy().rank(candidates, &usage) {
            prop_assert_eq!(r.usage_score, usage.usage(&r.coordinate()));
        }
    }

    #[test]
    fn tail_is_alphabetical((candidates, usage) in arb_candidates()) {
        let policy = policy();
        let results = policy.rank(candidates, &usage);
        let starred = policy.starred_size(results.len());
        for pair in results[starred..].windows(2) {
            prop_assert!(
                pair[0].simple_class_name.to_lowercase() <= pair[1].simple_class_name.to_lowercase()
            );
        }
    }

    #[test]
    fn starred_window_is_in_rank_order((candidates, usage) in arb_candidates()) {
        let policy = policy();
        let results = policy.rank(candidates, &usage);
        let starred = policy.starred_size(results.len());

        // The last slot may hold a promoted curated entry
        let ordered = if starred > 1 && policy.curated.contains(&results[starred - 1].artifact_id) {
            &results[..starred - 1]
        } else {
            &results[..starred]
        };
        for pair in ordered.windows(2) {
            prop_assert!(pair[0].rank_key() <= pair[1].rank_key());
        }
    }

    #[test]
    fn curated_match_is_visible_when_window_allows((candidates, usage) in arb_candidates()) {
        let policy = policy();
        let results = policy.rank(candidates, &usage);
        let starred = policy.starred_size(results.len());

        if starred > 1 && results.iter().any(|r| r.artifact_id == CURATED) {
            prop_assert!(results[..starred].iter().any(|r| r.artifact_id == CURATED));
        }
    }

    #[test]
    fn ranking_is_deterministic((candidates, usage) in arb_candidates()) {
        let mut reversed = candidates.clone();
        reversed.reverse();
        prop_assert_eq!(policy().rank(candidates, &usage), policy().rank(reversed, &usage));
    }

    #[test]
    fn prefix_classification_is_case_insensitive(
        package in "[a-z]{1,4}",
        name in "[A-Za-z]{1,12}",
        cut in 1usize..12,
    ) {
        let fqn = format!("{package}.{name}");
        let query: String = name.chars().take(cut.min(name.len())).collect();
        prop_assert_eq!(match_kind(&fqn, &query.to_uppercase()), Some(MatchKind::Prefix));
        prop_assert_eq!(match_kind(&fqn, &query.to_lowercase()), Some(MatchKind::Prefix));
    }

    #[test]
    fn starred_size_is_bounded(total in 0usize..500) {
        let policy = policy();
        let starred = policy.starred_size(total);
        prop_assert!(starred <= policy.starred_cap);
        prop_assert!(starred <= total);
    }
}
