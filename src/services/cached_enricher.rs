//! Cache-aside enrichment of ranked leaderboard members.
//!
//! One call does at most one cache read, one profile fetch and one cache
//! write, strictly in that order. Cache failures degrade to a live fetch;
//! profile source failures abort the call with the batch untouched.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::domain::errors::{EnrichmentError, EnrichmentResult};
use crate::domain::models::{
    Config, EnrichmentReport, Member, Profile, ProfileQuery, RequestContext,
};
use crate::domain::ports::{CacheLookup, Enricher, EnrichmentCache, ProfileSource};

/// Default time to live for cached profiles.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Enricher that consults an [`EnrichmentCache`] before the [`ProfileSource`].
pub struct CachedEnricher {
    cache: Arc<dyn EnrichmentCache>,
    source: Arc<dyn ProfileSource>,
    ttl: Duration,
    disabled_tenants: HashSet<String>,
}

impl CachedEnricher {
    /// Enricher with the default TTL and every tenant enabled.
    pub fn new(cache: Arc<dyn EnrichmentCache>, source: Arc<dyn ProfileSource>) -> Self {
        Self {
            cache,
            source,
            ttl: DEFAULT_CACHE_TTL,
            disabled_tenants: HashSet::new(),
        }
    }

    /// Build an enricher with the TTL and tenant switches from `config`.
    pub fn from_config(
        cache: Arc<dyn EnrichmentCache>,
        source: Arc<dyn ProfileSource>,
        config: &Config,
    ) -> Self {
        Self::new(cache, source)
            .with_ttl(config.cache.ttl())
            .with_disabled_tenants(config.enrichment.disabled_tenants.iter().cloned())
    }

    /// TTL applied to every cache write.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Tenants whose batches are returned without enrichment.
    #[must_use]
    pub fn with_disabled_tenants<I, T>(mut self, tenants: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.disabled_tenants = tenants.into_iter().map(Into::into).collect();
        self
    }

    /// Configured cache TTL.
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read the cache, treating a backend failure as a full miss.
    async fn lookup(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        member_ids: &[String],
    ) -> EnrichmentResult<CacheLookup> {
        let read = ctx
            .run(self.cache.get(ctx, tenant_id, leaderboard_id, member_ids))
            .await?;

        Ok(read.unwrap_or_else(|err| {
            warn!(
                tenant_id,
                leaderboard_id,
                error = %err,
                "could not get cached enrichment data"
            );
            CacheLookup::miss()
        }))
    }
}

#[async_trait]
impl Enricher for CachedEnricher {
    async fn enrich(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        members: &mut [Member],
    ) -> EnrichmentResult<EnrichmentReport> {
        if members.is_empty() {
            return Ok(EnrichmentReport::default());
        }

        validate_identifier("tenant_id", tenant_id)?;
        validate_identifier("leaderboard_id", leaderboard_id)?;

        if self.disabled_tenants.contains(tenant_id) {
            debug!(tenant_id, "enrichment disabled for tenant, skipping");
            return Ok(EnrichmentReport::skipped(members.len()));
        }

        let member_ids = unique_ids(members);
        let cached = self.lookup(ctx, tenant_id, leaderboard_id, &member_ids).await?;

        if cached.all_hit {
            debug!(tenant_id, leaderboard_id, "returning cached enrichment data");
            let plan = MergePlan::build(members, &cached.profiles, &HashMap::new());
            return Ok(plan.apply(members));
        }

        let query = ProfileQuery::new(
            tenant_id,
            leaderboard_id,
            missing_members(members, &cached.profiles),
        );
        debug!(
            tenant_id,
            leaderboard_id,
            cached = cached.profiles.len(),
            missing = query.members.len(),
            "fetching missing profiles"
        );

        let response = ctx
            .run(self.source.fetch(ctx, &query))
            .await?
            .map_err(|err| {
                error!(
                    tenant_id,
                    leaderboard_id,
                    error = %err,
                    "could not enrich with profile source"
                );
                EnrichmentError::from(err)
            })?;

        let requested: HashSet<&str> = query
            .members
            .iter()
            .map(|member| member.public_id.as_str())
            .collect();
        let fetched: HashMap<String, Profile> = response
            .documents
            .iter()
            .filter(|doc| requested.contains(doc.account_id.as_str()))
            .map(|doc| (doc.account_id.clone(), doc.profile()))
            .collect();

        let plan = MergePlan::build(members, &cached.profiles, &fetched);
        let resolved = plan.resolved_members(members);

        if !resolved.is_empty() {
            let write = ctx
                .run(self.cache.set(ctx, tenant_id, leaderboard_id, &resolved, self.ttl))
                .await?;
            if let Err(err) = write {
                warn!(
                    tenant_id,
                    leaderboard_id,
                    error = %err,
                    "could not set cached enrichment data"
                );
            }
        }

        Ok(plan.apply(members))
    }
}

/// Where each member's profile comes from, decided before anything is written.
struct MergePlan {
    entries: Vec<Option<(Profile, Origin)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Cache,
    Fetch,
}

impl MergePlan {
    fn build(
        members: &[Member],
        cached: &HashMap<String, Profile>,
        fetched: &HashMap<String, Profile>,
    ) -> Self {
        let entries = members
            .iter()
            .map(|member| {
                fetched
                    .get(&member.public_id)
                    .map(|profile| (profile.clone(), Origin::Fetch))
                    .or_else(|| {
                        cached
                            .get(&member.public_id)
                            .map(|profile| (profile.clone(), Origin::Cache))
                    })
            })
            .collect();

        Self { entries }
    }

    /// Copies of the members resolved by the fetch, one per identifier.
    fn resolved_members(&self, members: &[Member]) -> Vec<Member> {
        let mut seen = HashSet::new();
        members
            .iter()
            .zip(&self.entries)
            .filter_map(|(member, entry)| match entry {
                Some((profile, Origin::Fetch)) if seen.insert(member.public_id.as_str()) => {
                    let mut resolved = member.clone();
                    resolved.apply_profile(profile);
                    Some(resolved)
                }
                _ => None,
            })
            .collect()
    }

    fn apply(self, members: &mut [Member]) -> EnrichmentReport {
        let mut report = EnrichmentReport {
            total: members.len(),
            ..Default::default()
        };

        for (member, entry) in members.iter_mut().zip(self.entries) {
            match entry {
                Some((profile, origin)) => {
                    member.apply_profile(&profile);
                    match origin {
                        Origin::Cache => report.cache_hits += 1,
                        Origin::Fetch => report.fetched += 1,
                    }
                }
                None => report.unresolved += 1,
            }
        }

        report
    }
}

fn validate_identifier(name: &str, value: &str) -> EnrichmentResult<()> {
    if value.trim().is_empty() {
        return Err(EnrichmentError::InvalidArgument(format!(
            "{name} cannot be empty"
        )));
    }
    Ok(())
}

/// Member identifiers in first-appearance order, without repeats.
fn unique_ids(members: &[Member]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(members.len());
    members
        .iter()
        .filter(|member| seen.insert(member.public_id.as_str()))
        .map(|member| member.public_id.clone())
        .collect()
}

/// Unenriched copies of the members absent from `cached`, first occurrence
/// of each identifier only.
fn missing_members(members: &[Member], cached: &HashMap<String, Profile>) -> Vec<Member> {
    let mut seen = HashSet::new();
    members
        .iter()
        .filter(|member| !cached.contains_key(&member.public_id))
        .filter(|member| seen.insert(member.public_id.as_str()))
        .map(|member| Member::new(member.public_id.clone(), member.rank, member.score))
        .collect()
}
