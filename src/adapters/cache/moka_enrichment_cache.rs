//! Enrichment cache backed by a moka TTL cache.
//!
//! Every insert carries its own time to live through a per-entry
//! [`Expiry`] policy, so the enricher's configured TTL applies to each
//! `set` call rather than being fixed when the cache is built.

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::errors::CacheResult;
use crate::domain::models::{Member, Profile, RequestContext};
use crate::domain::ports::{cache_key, CacheLookup, EnrichmentCache};

/// Default maximum number of cached member profiles.
const DEFAULT_MAX_CAPACITY: u64 = 100_000;

/// A cached profile together with the TTL it was written with.
#[derive(Debug, Clone)]
struct CachedProfile {
    profile: Arc<Profile>,
    ttl: Duration,
}

/// Expires each entry `ttl` after it was last written.
struct ProfileExpiry;

impl Expiry<String, CachedProfile> for ProfileExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedProfile,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedProfile,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process enrichment cache.
///
/// Keys follow [`cache_key`]; values are the profile fields of one member.
/// moka handles concurrent access and passive expiry.
#[derive(Clone)]
pub struct MokaEnrichmentCache {
    entries: Cache<String, CachedProfile>,
}

impl MokaEnrichmentCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Create a cache holding at most `max_capacity` member profiles.
    pub fn with_capacity(max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(ProfileExpiry)
            .build();

        Self { entries }
    }

    /// Number of entries, including ones pending eviction.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Apply pending inserts and evictions so `entry_count` is current.
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }
}

impl Default for MokaEnrichmentCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnrichmentCache for MokaEnrichmentCache {
    async fn get(
        &self,
        _ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        member_ids: &[String],
    ) -> CacheResult<CacheLookup> {
        let mut profiles = HashMap::with_capacity(member_ids.len());
        for member_id in member_ids {
            let key = cache_key(tenant_id, leaderboard_id, member_id);
            if let Some(cached) = self.entries.get(&key).await {
                profiles.insert(member_id.clone(), (*cached.profile).clone());
            }
        }

        Ok(CacheLookup::from_profiles(member_ids, profiles))
    }

    async fn set(
        &self,
        _ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        members: &[Member],
        ttl: Duration,
    ) -> CacheResult<()> {
        for member in members {
            let value = CachedProfile {
                profile: Arc::new(member.profile()),
                ttl,
            };
            self.entries
                .insert(cache_key(tenant_id, leaderboard_id, &member.public_id), value)
                .await;
        }
        Ok(())
    }
}
