//! Enrichment cache decorator that counts and times every call.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

use crate::domain::errors::CacheResult;
use crate::domain::models::{Member, RequestContext};
use crate::domain::ports::{CacheLookup, EnrichmentCache};

/// Point-in-time copy of [`CacheMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// `get` calls made
    pub gets: u64,
    /// `get` calls where every requested member had a live entry
    pub hits: u64,
    /// `get` calls that failed
    pub get_errors: u64,
    /// `set` calls made
    pub sets: u64,
    /// `set` calls that failed
    pub set_errors: u64,
    /// Wall time spent in `get`
    pub get_elapsed_ms: u64,
    /// Wall time spent in `set`
    pub set_elapsed_ms: u64,
}

/// Counters shared between an [`InstrumentedEnrichmentCache`] and whoever
/// reports on it.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    gets: AtomicU64,
    hits: AtomicU64,
    get_errors: AtomicU64,
    sets: AtomicU64,
    set_errors: AtomicU64,
    get_elapsed_ms: AtomicU64,
    set_elapsed_ms: AtomicU64,
}

impl CacheMetrics {
    /// Current counter values.
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            gets: self.gets.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            get_errors: self.get_errors.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            set_errors: self.set_errors.load(Ordering::Relaxed),
            get_elapsed_ms: self.get_elapsed_ms.load(Ordering::Relaxed),
            set_elapsed_ms: self.set_elapsed_ms.load(Ordering::Relaxed),
        }
    }
}

/// Wraps any [`EnrichmentCache`] with call counters, timings and a tracing
/// span per call. Results pass through unchanged.
pub struct InstrumentedEnrichmentCache<C: EnrichmentCache + ?Sized> {
    inner: Arc<C>,
    metrics: Arc<CacheMetrics>,
}

impl<C: EnrichmentCache + ?Sized> InstrumentedEnrichmentCache<C> {
    /// Instrument `inner` with fresh counters.
    pub fn new(inner: Arc<C>) -> Self {
        Self {
            inner,
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    /// Handle on the counters, valid after the decorator is boxed away.
    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }
}

#[async_trait]
impl<C: EnrichmentCache + ?Sized + 'static> EnrichmentCache for InstrumentedEnrichmentCache<C> {
    async fn get(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        member_ids: &[String],
    ) -> CacheResult<CacheLookup> {
        let span = tracing::debug_span!("enrichment_cache.get", tenant_id, leaderboard_id);
        let start = Instant::now();

        let result = self
            .inner
            .get(ctx, tenant_id, leaderboard_id, member_ids)
            .instrument(span)
            .await;

        let elapsed_ms = millis(start.elapsed());
        self.metrics.gets.fetch_add(1, Ordering::Relaxed);
        self.metrics
            .get_elapsed_ms
            .fetch_add(elapsed_ms, Ordering::Relaxed);

        match &result {
            Ok(lookup) => {
                if lookup.all_hit {
                    self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                }
                tracing::debug!(
                    tenant_id,
                    leaderboard_id,
                    requested = member_ids.len(),
                    found = lookup.profiles.len(),
                    hit = lookup.all_hit,
                    elapsed_ms,
                    "enrichment cache get"
                );
            }
            Err(err) => {
                self.metrics.get_errors.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    tenant_id,
                    leaderboard_id,
                    elapsed_ms,
                    error = %err,
                    "enrichment cache get failed"
                );
            }
        }

        result
    }

    async fn set(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        members: &[Member],
        ttl: Duration,
    ) -> CacheResult<()> {
        let span = tracing::debug_span!(
            "enrichment_cache.set",
            tenant_id,
            leaderboard_id,
            ttl_secs = ttl.as_secs()
        );
        let start = Instant::now();

        let result = self
            .inner
            .set(ctx, tenant_id, leaderboard_id, members, ttl)
            .instrument(span)
            .await;

        let elapsed_ms = millis(start.elapsed());
        self.metrics.sets.fetch_add(1, Ordering::Relaxed);
        self.metrics
            .set_elapsed_ms
            .fetch_add(elapsed_ms, Ordering::Relaxed);

        match &result {
            Ok(()) => tracing::debug!(
                tenant_id,
                leaderboard_id,
                members = members.len(),
                elapsed_ms,
                "enrichment cache set"
            ),
            Err(err) => {
                self.metrics.set_errors.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    tenant_id,
                    leaderboard_id,
                    elapsed_ms,
                    error = %err,
                    "enrichment cache set failed"
                );
            }
        }

        result
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
