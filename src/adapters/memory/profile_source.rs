//! In-memory profile source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::errors::{ProfileSourceError, ProfileSourceResult};
use crate::domain::models::{
    ProfileBatchRequest, ProfileBatchResponse, ProfileDocument, ProfileQuery, RequestContext,
};
use crate::domain::ports::ProfileSource;

/// Test double for [`ProfileSource`].
///
/// Holds documents per tenant, answers only for the identifiers it knows,
/// and records every query it receives.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileSource {
    documents: Arc<RwLock<HashMap<String, HashMap<String, ProfileDocument>>>>,
    queries: Arc<RwLock<Vec<ProfileQuery>>>,
    failure: Arc<RwLock<Option<String>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl InMemoryProfileSource {
    /// Empty source that knows no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document for `tenant_id`, replacing any previous one.
    pub async fn insert(&self, tenant_id: &str, document: ProfileDocument) {
        self.documents
            .write()
            .await
            .entry(tenant_id.to_string())
            .or_default()
            .insert(document.account_id.clone(), document);
    }

    /// Fail every subsequent fetch with `message`, or stop failing with `None`.
    pub async fn set_failure(&self, message: Option<&str>) {
        *self.failure.write().await = message.map(str::to_string);
    }

    /// Delay every fetch by `delay` before answering.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Every query received so far, in arrival order.
    pub async fn recorded_queries(&self) -> Vec<ProfileQuery> {
        self.queries.read().await.clone()
    }

    /// Received queries as the profile store would see them on the wire.
    pub async fn recorded_requests(&self) -> Vec<ProfileBatchRequest> {
        self.queries
            .read()
            .await
            .iter()
            .map(ProfileQuery::batch_request)
            .collect()
    }
}

#[async_trait]
impl ProfileSource for InMemoryProfileSource {
    async fn fetch(
        &self,
        _ctx: &RequestContext,
        query: &ProfileQuery,
    ) -> ProfileSourceResult<ProfileBatchResponse> {
        self.queries.write().await.push(query.clone());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.failure.read().await.clone() {
            return Err(ProfileSourceError::Unavailable(message));
        }

        let documents = self.documents.read().await;
        let Some(tenant_documents) = documents.get(&query.tenant_id) else {
            return Ok(ProfileBatchResponse::default());
        };

        let documents = query
            .members
            .iter()
            .filter_map(|m| tenant_documents.get(&m.public_id).cloned())
            .collect();

        Ok(ProfileBatchResponse { documents })
    }
}
