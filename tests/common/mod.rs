//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::sync::Arc;

use leaderboard_enrichment::adapters::memory::{InMemoryEnrichmentCache, InMemoryProfileSource};
use leaderboard_enrichment::{CachedEnricher, Member, Profile};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Enricher wired to in-memory doubles, plus handles to inspect them.
pub struct Harness {
    pub cache: InMemoryEnrichmentCache,
    pub source: InMemoryProfileSource,
    pub enricher: CachedEnricher,
}

impl Harness {
    pub fn new() -> Self {
        let cache = InMemoryEnrichmentCache::new();
        let source = InMemoryProfileSource::new();
        let enricher = CachedEnricher::new(Arc::new(cache.clone()), Arc::new(source.clone()));
        Self {
            cache,
            source,
            enricher,
        }
    }
}

/// Members `ids[i]` ranked `i + 1` with descending scores.
pub fn ranked(ids: &[&str]) -> Vec<Member> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            let rank = u32::try_from(i + 1).unwrap();
            Member::new(*id, rank, 1_000 - i64::from(rank) * 10)
        })
        .collect()
}

pub fn named(name: &str) -> Profile {
    Profile {
        display_name: Some(name.to_string()),
        avatar_url: Some(format!("http://x/{name}.png")),
    }
}

/// Rank and score pairs, for comparing batches before and after enrichment.
pub fn rank_and_score(members: &[Member]) -> Vec<(String, u32, i64)> {
    members
        .iter()
        .map(|m| (m.public_id.clone(), m.rank, m.score))
        .collect()
}
