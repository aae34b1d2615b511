//! HTTP client for a tenant's enrichment webhook.
//!
//! The webhook is posted the leaderboard id, rank and score of every member
//! still missing a profile, and answers with metadata per member id.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::client::{build_endpoint, effective_timeout, http_client, post_json};
use crate::domain::errors::ProfileSourceResult;
use crate::domain::models::{
    ProfileBatchResponse, ProfileQuery, RequestContext, WebhookEnrichRequest,
    WebhookEnrichResponse,
};
use crate::domain::ports::ProfileSource;

/// Path of the enrich call, relative to the webhook base URL.
pub const WEBHOOK_ENRICH_PATH: &str = "leaderboards/enrich";

/// Enrichment webhook of a single tenant.
#[derive(Debug, Clone)]
pub struct HttpWebhookSource {
    http: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpWebhookSource {
    /// Create a client for the webhook rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> ProfileSourceResult<Self> {
        Ok(Self {
            http: http_client()?,
            endpoint: build_endpoint(base_url, WEBHOOK_ENRICH_PATH)?,
            timeout,
        })
    }

    /// Fully resolved enrich endpoint.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProfileSource for HttpWebhookSource {
    async fn fetch(
        &self,
        ctx: &RequestContext,
        query: &ProfileQuery,
    ) -> ProfileSourceResult<ProfileBatchResponse> {
        tracing::debug!(
            endpoint = %self.endpoint,
            tenant_id = %query.tenant_id,
            leaderboard_id = %query.leaderboard_id,
            members = query.members.len(),
            "calling enrichment webhook"
        );

        let response: WebhookEnrichResponse = post_json(
            &self.http,
            &self.endpoint,
            effective_timeout(self.timeout, ctx),
            &WebhookEnrichRequest::from(query),
        )
        .await?;

        Ok(response.into())
    }
}
