//! Per-tenant choice between a tenant's webhook and the profile store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::client::HttpProfileSource;
use super::webhook::HttpWebhookSource;
use crate::domain::errors::ProfileSourceResult;
use crate::domain::models::{Config, ProfileBatchResponse, ProfileQuery, RequestContext};
use crate::domain::ports::ProfileSource;

/// Routes each query to the tenant's webhook when one is registered, and to
/// the shared profile store otherwise.
///
/// A tenant with neither gets an empty answer, which leaves its members
/// unresolved without failing the call.
#[derive(Clone, Default)]
pub struct ProfileSourceRouter {
    webhooks: HashMap<String, Arc<dyn ProfileSource>>,
    fallback: Option<Arc<dyn ProfileSource>>,
}

impl ProfileSourceRouter {
    /// Router with an optional shared profile store and no webhooks.
    pub fn new(fallback: Option<Arc<dyn ProfileSource>>) -> Self {
        Self {
            webhooks: HashMap::new(),
            fallback,
        }
    }

    /// Build the webhooks in `enrichment.webhook_urls` (blank URLs are
    /// skipped) and the profile store when `profile_source.base_url` is set.
    pub fn from_config(config: &Config) -> ProfileSourceResult<Self> {
        let fallback: Option<Arc<dyn ProfileSource>> =
            if config.profile_source.base_url.trim().is_empty() {
                None
            } else {
                Some(Arc::new(HttpProfileSource::new(&config.profile_source)?))
            };

        let mut router = Self::new(fallback);
        for tenant_id in config.enrichment.webhook_urls.keys() {
            if let Some(url) = config.enrichment.webhook_url(tenant_id) {
                let webhook = HttpWebhookSource::new(url, config.enrichment.webhook_timeout())?;
                router = router.with_webhook(tenant_id.clone(), Arc::new(webhook));
            }
        }
        Ok(router)
    }

    /// Serve `tenant_id` from `source` instead of the shared profile store.
    #[must_use]
    pub fn with_webhook(mut self, tenant_id: impl Into<String>, source: Arc<dyn ProfileSource>) -> Self {
        self.webhooks.insert(tenant_id.into(), source);
        self
    }

    /// Source that will answer queries for `tenant_id`, if any.
    pub fn route(&self, tenant_id: &str) -> Option<&Arc<dyn ProfileSource>> {
        self.webhooks.get(tenant_id).or(self.fallback.as_ref())
    }

    /// Whether `tenant_id` is served by a webhook.
    pub fn has_webhook(&self, tenant_id: &str) -> bool {
        self.webhooks.contains_key(tenant_id)
    }
}

#[async_trait]
impl ProfileSource for ProfileSourceRouter {
    async fn fetch(
        &self,
        ctx: &RequestContext,
        query: &ProfileQuery,
    ) -> ProfileSourceResult<ProfileBatchResponse> {
        let Some(source) = self.route(&query.tenant_id) else {
            tracing::debug!(
                tenant_id = %query.tenant_id,
                "no webhook or profile store configured for tenant, skipping lookup"
            );
            return Ok(ProfileBatchResponse::default());
        };

        source.fetch(ctx, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileSource;
    use crate::domain::models::{Member, ProfileDocument};

    fn query(tenant_id: &str) -> ProfileQuery {
        ProfileQuery::new(tenant_id, "lb1", vec![Member::new("m1", 1, 100)])
    }

    #[tokio::test]
    async fn test_webhook_takes_precedence_over_store() {
        let store = InMemoryProfileSource::new();
        let webhook = InMemoryProfileSource::new();
        store.insert("t1", ProfileDocument::new("m1", "from-store", "")).await;
        webhook.insert("t1", ProfileDocument::new("m1", "from-webhook", "")).await;

        let router = ProfileSourceRouter::new(Some(Arc::new(store.clone())))
            .with_webhook("t1", Arc::new(webhook.clone()));
        let response = router.fetch(&RequestContext::new(), &query("t1")).await.unwrap();

        assert_eq!(
            response.documents[0].profile().display_name.as_deref(),
            Some("from-webhook")
        );
        assert!(store.recorded_requests().await.is_empty());
        assert_eq!(webhook.recorded_queries().await, vec![query("t1")]);
    }

    #[tokio::test]
    async fn test_other_tenants_use_store() {
        let store = InMemoryProfileSource::new();
        let webhook = InMemoryProfileSource::new();

        let router = ProfileSourceRouter::new(Some(Arc::new(store.clone())))
            .with_webhook("t1", Arc::new(webhook.clone()));
        router.fetch(&RequestContext::new(), &query("t2")).await.unwrap();

        assert_eq!(store.recorded_queries().await, vec![query("t2")]);
        assert!(webhook.recorded_queries().await.is_empty());
    }

    #[tokio::test]
    async fn test_no_route_answers_empty() {
        let router = ProfileSourceRouter::default();
        let response = router.fetch(&RequestContext::new(), &query("t1")).await.unwrap();
        assert!(response.documents.is_empty());
    }

    #[test]
    fn test_from_config_skips_blank_webhooks() {
        let mut config = Config::default();
        config
            .enrichment
            .webhook_urls
            .insert("t1".to_string(), "hooks.partner.example".to_string());
        config
            .enrichment
            .webhook_urls
            .insert("t2".to_string(), String::new());

        let router = ProfileSourceRouter::from_config(&config).unwrap();
        assert!(router.has_webhook("t1"));
        assert!(!router.has_webhook("t2"));
        assert!(router.route("t2").is_none());

        config.profile_source.base_url = "profiles.internal".to_string();
        let router = ProfileSourceRouter::from_config(&config).unwrap();
        assert!(router.route("t2").is_some());
    }
}
