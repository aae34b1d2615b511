//! Null enrichment cache implementation.
//!
//! Used when caching is disabled in configuration but the enricher
//! still needs an EnrichmentCache implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::errors::CacheResult;
use crate::domain::models::{Member, RequestContext};
use crate::domain::ports::{CacheLookup, EnrichmentCache};

/// A cache that never hits and stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEnrichmentCache;

impl NullEnrichmentCache {
    /// The no-op cache.
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnrichmentCache for NullEnrichmentCache {
    async fn get(
        &self,
        _ctx: &RequestContext,
        _tenant_id: &str,
        _leaderboard_id: &str,
        member_ids: &[String],
    ) -> CacheResult<CacheLookup> {
        Ok(CacheLookup::from_profiles(member_ids, HashMap::new()))
    }

    async fn set(
        &self,
        _ctx: &RequestContext,
        _tenant_id: &str,
        _leaderboard_id: &str,
        _members: &[Member],
        _ttl: Duration,
    ) -> CacheResult<()> {
        Ok(())
    }
}
