//! Profile source port - batch lookup of public profile data.

use async_trait::async_trait;

use crate::domain::errors::ProfileSourceResult;
use crate::domain::models::{ProfileBatchResponse, ProfileQuery, RequestContext};

/// External provider of player profiles: the shared profile store or a
/// tenant's own enrichment webhook.
///
/// Unknown identifiers are omitted from the response rather than reported as
/// errors. Any error is a hard failure for the enrichment call that issued it.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Resolve the profiles of `query.members`.
    async fn fetch(
        &self,
        ctx: &RequestContext,
        query: &ProfileQuery,
    ) -> ProfileSourceResult<ProfileBatchResponse>;
}
