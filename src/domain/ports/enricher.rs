//! Enricher port - decorates ranked members with profile data.

use async_trait::async_trait;

use crate::domain::errors::EnrichmentResult;
use crate::domain::models::{EnrichmentReport, Member, RequestContext};

/// Enrichment orchestration capability.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Fill in the profile fields of `members`.
    ///
    /// Only `display_name` and `avatar_url` are written; identifiers, ranks,
    /// scores and ordering are left as they are. On error no member is modified.
    async fn enrich(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        members: &mut [Member],
    ) -> EnrichmentResult<EnrichmentReport>;
}
