//! Hooks for the enrich boundary: structured logging and call counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::domain::errors::EnrichmentResult;
use crate::domain::models::EnrichmentReport;
use crate::domain::ports::{EnrichCall, EnrichHook};

/// Emits a tracing event for every enrich call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl EnrichHook for TracingHook {
    fn before(&self, call: &EnrichCall<'_>) {
        debug!(
            tenant_id = call.tenant_id,
            leaderboard_id = call.leaderboard_id,
            members = call.member_count,
            "enrich started"
        );
    }

    fn after(
        &self,
        call: &EnrichCall<'_>,
        outcome: &EnrichmentResult<EnrichmentReport>,
        elapsed: Duration,
    ) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        match outcome {
            Ok(report) => info!(
                tenant_id = call.tenant_id,
                leaderboard_id = call.leaderboard_id,
                members = report.total,
                cache_hits = report.cache_hits,
                fetched = report.fetched,
                unresolved = report.unresolved,
                skipped = report.skipped,
                elapsed_ms,
                "enrich finished"
            ),
            Err(err) => error!(
                tenant_id = call.tenant_id,
                leaderboard_id = call.leaderboard_id,
                members = call.member_count,
                elapsed_ms,
                error = %err,
                "enrich failed"
            ),
        }
    }
}

/// Point-in-time copy of [`CallStatsHook`] counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CallStats {
    /// Enrich calls observed
    pub calls: u64,
    /// Calls that returned an error
    pub failures: u64,
    /// Members across successful calls
    pub members: u64,
    /// Members served from the cache
    pub cache_hits: u64,
    /// Members resolved by the profile source
    pub fetched: u64,
    /// Wall time spent in enrich calls
    pub total_elapsed_ms: u64,
}

/// Counts enrich calls, failures and where member profiles came from.
#[derive(Debug, Default)]
pub struct CallStatsHook {
    calls: AtomicU64,
    failures: AtomicU64,
    members: AtomicU64,
    cache_hits: AtomicU64,
    fetched: AtomicU64,
    total_elapsed_ms: AtomicU64,
}

impl CallStatsHook {
    /// Hook with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter values.
    pub fn snapshot(&self) -> CallStats {
        CallStats {
            calls: self.calls.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            members: self.members.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            fetched: self.fetched.load(Ordering::Relaxed),
            total_elapsed_ms: self.total_elapsed_ms.load(Ordering::Relaxed),
        }
    }
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

impl EnrichHook for CallStatsHook {
    fn after(
        &self,
        call: &EnrichCall<'_>,
        outcome: &EnrichmentResult<EnrichmentReport>,
        elapsed: Duration,
    ) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.members
            .fetch_add(count(call.member_count), Ordering::Relaxed);
        self.total_elapsed_ms.fetch_add(
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            Ordering::Relaxed,
        );

        match outcome {
            Ok(report) => {
                self.cache_hits
                    .fetch_add(count(report.cache_hits), Ordering::Relaxed);
                self.fetched
                    .fetch_add(count(report.fetched), Ordering::Relaxed);
            }
            Err(_) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
