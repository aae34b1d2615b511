//! In-memory enrichment cache for testing.
//!
//! Stores entries as JSON strings with an expiry instant, records every
//! call, and can be told to fail reads or writes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::{Member, Profile, RequestContext};
use crate::domain::ports::{cache_key, CacheLookup, EnrichmentCache};

/// A recorded `get` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedGet {
    /// Tenant passed to `get`
    pub tenant_id: String,
    /// Leaderboard passed to `get`
    pub leaderboard_id: String,
    /// Identifiers looked up
    pub member_ids: Vec<String>,
}

/// A recorded `set` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSet {
    /// Tenant passed to `set`
    pub tenant_id: String,
    /// Leaderboard passed to `set`
    pub leaderboard_id: String,
    /// Members written
    pub members: Vec<Member>,
    /// TTL requested for the write
    pub ttl: Duration,
}

#[derive(Debug, Clone)]
struct StoredEntry {
    json: String,
    expires_at: Instant,
}

/// Test double for [`EnrichmentCache`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnrichmentCache {
    entries: Arc<RwLock<HashMap<String, StoredEntry>>>,
    gets: Arc<RwLock<Vec<RecordedGet>>>,
    sets: Arc<RwLock<Vec<RecordedSet>>>,
    fail_get: Arc<AtomicBool>,
    fail_set: Arc<AtomicBool>,
    get_delay: Arc<RwLock<Option<Duration>>>,
}

impl InMemoryEnrichmentCache {
    /// Empty cache with every call succeeding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `get` calls fail with a backend error.
    pub fn fail_gets(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `set` calls fail with a backend error.
    pub fn fail_sets(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    /// Delay every `get` by `delay` before answering.
    pub async fn delay_gets(&self, delay: Duration) {
        *self.get_delay.write().await = Some(delay);
    }

    /// Seed a live entry directly, bypassing call recording.
    pub async fn seed(
        &self,
        tenant_id: &str,
        leaderboard_id: &str,
        member_id: &str,
        profile: &Profile,
        ttl: Duration,
    ) -> CacheResult<()> {
        let entry = StoredEntry {
            json: serde_json::to_string(profile)?,
            expires_at: Instant::now() + ttl,
        };
        self.entries
            .write()
            .await
            .insert(cache_key(tenant_id, leaderboard_id, member_id), entry);
        Ok(())
    }

    /// Every `get` received so far.
    pub async fn recorded_gets(&self) -> Vec<RecordedGet> {
        self.gets.read().await.clone()
    }

    /// Every `set` received so far.
    pub async fn recorded_sets(&self) -> Vec<RecordedSet> {
        self.sets.read().await.clone()
    }

    /// Number of live entries.
    pub async fn live_entries(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }
}

#[async_trait]
impl EnrichmentCache for InMemoryEnrichmentCache {
    async fn get(
        &self,
        _ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        member_ids: &[String],
    ) -> CacheResult<CacheLookup> {
        self.gets.write().await.push(RecordedGet {
            tenant_id: tenant_id.to_string(),
            leaderboard_id: leaderboard_id.to_string(),
            member_ids: member_ids.to_vec(),
        });

        let delay = *self.get_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_get.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("simulated read failure".to_string()));
        }

        let now = Instant::now();
        let entries = self.entries.read().await;
        let mut profiles = HashMap::new();
        for member_id in member_ids {
            let key = cache_key(tenant_id, leaderboard_id, member_id);
            if let Some(entry) = entries.get(&key).filter(|entry| entry.expires_at > now) {
                profiles.insert(member_id.clone(), serde_json::from_str(&entry.json)?);
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
        self.sets.write().await.push(RecordedSet {
            tenant_id: tenant_id.to_string(),
            leaderboard_id: leaderboard_id.to_string(),
            members: members.to_vec(),
            ttl,
        });

        if self.fail_set.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("simulated write failure".to_string()));
        }

        let expires_at = Instant::now() + ttl;
        let mut entries = self.entries.write().await;
        for member in members {
            let entry = StoredEntry {
                json: serde_json::to_string(&member.profile())?,
                expires_at,
            };
            entries.insert(cache_key(tenant_id, leaderboard_id, &member.public_id), entry);
        }
        Ok(())
    }
}
