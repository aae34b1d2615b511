//! Enrichment cache port - TTL overlay of resolved profiles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::errors::CacheResult;
use crate::domain::models::{Member, Profile, RequestContext};

/// Prefix shared by every enrichment cache key.
pub const CACHE_KEY_PREFIX: &str = "leaderboards-enrich-caching";

/// Build the cache key for one `(tenant, leaderboard, member)` triple.
pub fn cache_key(tenant_id: &str, leaderboard_id: &str, member_id: &str) -> String {
    format!("{CACHE_KEY_PREFIX}:{tenant_id}:{leaderboard_id}:{member_id}")
}

/// Result of a batch cache read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheLookup {
    /// Profiles for the requested members that had a live entry
    pub profiles: HashMap<String, Profile>,

    /// True only when every requested member had a live entry
    pub all_hit: bool,
}

impl CacheLookup {
    /// Build a lookup, deriving `all_hit` from the requested identifiers.
    pub fn from_profiles(requested: &[String], profiles: HashMap<String, Profile>) -> Self {
        let all_hit = requested.iter().all(|id| profiles.contains_key(id));
        Self { profiles, all_hit }
    }

    /// A lookup that found nothing.
    pub fn miss() -> Self {
        Self::default()
    }
}

/// Cache of resolved member profiles keyed by `(tenant, leaderboard, member)`.
///
/// Implementations must tolerate concurrent reads and writes from any
/// number of callers. Errors are soft: the enricher logs them and carries on.
#[async_trait]
pub trait EnrichmentCache: Send + Sync {
    /// Read the live entries for `member_ids`.
    ///
    /// The returned map only contains identifiers with a non-expired entry.
    async fn get(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        member_ids: &[String],
    ) -> CacheResult<CacheLookup>;

    /// Upsert the profile carried by each member, expiring after `ttl`.
    ///
    /// Must be idempotent.
    async fn set(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        members: &[Member],
        ttl: Duration,
    ) -> CacheResult<()>;
}
