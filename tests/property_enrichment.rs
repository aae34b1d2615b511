//! Property tests: enrichment never reorders, drops or re-scores members.

mod common;

use std::collections::HashSet;
use std::time::Duration;

use common::{rank_and_score, Harness};
use leaderboard_enrichment::{Enricher, Member, Profile, ProfileDocument, RequestContext};
use proptest::prelude::*;

fn members_strategy() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec(("m[0-9]{1,2}", any::<u32>(), any::<i64>()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(id, rank, score)| Member::new(id, rank, score))
            .collect()
    })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

proptest! {
    /// Property: length, order, rank and score are preserved
    ///
    /// Holds whatever subset of members the profile store knows and
    /// whatever subset is already cached.
    #[test]
    fn prop_enrichment_preserves_batch_shape(
        members in members_strategy(),
        known in prop::collection::hash_set("m[0-9]{1,2}", 0..30),
        cached in prop::collection::hash_set("m[0-9]{1,2}", 0..30),
    ) {
        let result: Result<(), TestCaseError> = runtime().block_on(async {
            let h = Harness::new();
            for id in &known {
                h.source.insert("t1", ProfileDocument::new(id.clone(), format!("name-{id}"), "")).await;
            }
            for id in &cached {
                let profile = Profile {
                    display_name: Some(format!("cached-{id}")),
                    avatar_url: None,
                };
                h.cache
                    .seed("t1", "lb1", id, &profile, Duration::from_secs(60))
                    .await
                    .unwrap();
            }

            let mut enriched = members.clone();
            let report = h
                .enricher
                .enrich(&RequestContext::new(), "t1", "lb1", &mut enriched)
                .await
                .unwrap();

            prop_assert_eq!(enriched.len(), members.len());
            prop_assert_eq!(rank_and_score(&enriched), rank_and_score(&members));
            prop_assert_eq!(
                report.cache_hits + report.fetched + report.unresolved,
                members.len()
            );

            for member in &enriched {
                let id = &member.public_id;
                if cached.contains(id) {
                    prop_assert_eq!(member.display_name.clone(), Some(format!("cached-{id}")));
                } else if known.contains(id) {
                    prop_assert_eq!(member.display_name.clone(), Some(format!("name-{id}")));
                } else {
                    prop_assert!(!member.is_enriched());
                }
            }
            Ok(())
        });
        result?;
    }

    /// Property: the profile store is asked only for uncached identifiers
    #[test]
    fn prop_fetch_requests_only_missing_ids(
        members in members_strategy(),
        cached in prop::collection::hash_set("m[0-9]{1,2}", 0..30),
    ) {
        let result: Result<(), TestCaseError> = runtime().block_on(async {
            let h = Harness::new();
            for id in &cached {
                h.cache
                    .seed("t1", "lb1", id, &Profile::default(), Duration::from_secs(60))
                    .await
                    .unwrap();
            }

            let mut enriched = members.clone();
            h.enricher
                .enrich(&RequestContext::new(), "t1", "lb1", &mut enriched)
                .await
                .unwrap();

            let requests = h.source.recorded_requests().await;
            let missing: HashSet<&String> = members
                .iter()
                .map(|m| &m.public_id)
                .filter(|id| !cached.contains(*id))
                .collect();

            if missing.is_empty() {
                prop_assert!(requests.is_empty());
            } else {
                prop_assert_eq!(requests.len(), 1);
                let asked: HashSet<&String> = requests[0].public_account_ids.iter().collect();
                prop_assert_eq!(asked.len(), requests[0].public_account_ids.len());
                prop_assert_eq!(asked, missing);
            }
            Ok(())
        });
        result?;
    }
}
