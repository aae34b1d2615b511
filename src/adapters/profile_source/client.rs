//! HTTP client for the profile store's batch documents endpoint.
//!
//! Sends one POST per enrichment call with the tenant and the missing
//! account identifiers, and decodes whatever documents come back. Retries
//! are left to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::{ProfileSourceError, ProfileSourceResult};
use crate::domain::models::{
    ProfileBatchResponse, ProfileQuery, ProfileSourceConfig, RequestContext,
};
use crate::domain::ports::ProfileSource;

/// Profile store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProfileSource {
    /// The underlying HTTP client.
    http: Client,
    /// Fully resolved documents endpoint.
    endpoint: Url,
    /// Upper bound on a single request.
    timeout: Duration,
}

impl HttpProfileSource {
    /// Create a client from configuration.
    ///
    /// Fails if the configured URL cannot be parsed or the HTTP client
    /// cannot be built.
    pub fn new(config: &ProfileSourceConfig) -> ProfileSourceResult<Self> {
        let endpoint = build_endpoint(&config.base_url, &config.documents_path)?;
        let http = http_client()?;

        Ok(Self {
            http,
            endpoint,
            timeout: config.timeout(),
        })
    }

    /// Fully resolved documents endpoint.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request timeout, shortened to the caller's remaining deadline.
    fn effective_timeout(&self, ctx: &RequestContext) -> Duration {
        effective_timeout(self.timeout, ctx)
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch(
        &self,
        ctx: &RequestContext,
        query: &ProfileQuery,
    ) -> ProfileSourceResult<ProfileBatchResponse> {
        let request = query.batch_request();
        tracing::debug!(
            endpoint = %self.endpoint,
            tenant_id = %request.tenant_id,
            ids = request.public_account_ids.len(),
            "calling profile source"
        );

        post_json(
            &self.http,
            &self.endpoint,
            self.effective_timeout(ctx),
            &request,
        )
        .await
    }
}

/// Shared client settings for every outbound profile call.
pub(crate) fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .pool_max_idle_per_host(10)
        .tcp_nodelay(true)
        .build()
}

/// POST `body` as JSON and decode a successful JSON answer.
///
/// Non-2xx answers become [`ProfileSourceError::Status`] carrying the body.
pub(crate) async fn post_json<B, R>(
    http: &Client,
    endpoint: &Url,
    timeout: Duration,
    body: &B,
) -> ProfileSourceResult<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let resp = http
        .post(endpoint.clone())
        .timeout(timeout)
        .json(body)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ProfileSourceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ProfileSourceError::Decode(e.to_string()))
}

/// Shortest of `configured` and the time left before the caller's deadline.
pub(crate) fn effective_timeout(configured: Duration, ctx: &RequestContext) -> Duration {
    ctx.remaining()
        .map_or(configured, |remaining| remaining.min(configured))
}

/// Join `base_url` and `path` into the endpoint URL.
///
/// A base URL without a scheme is treated as plain http.
pub(crate) fn build_endpoint(base_url: &str, path: &str) -> ProfileSourceResult<Url> {
    let invalid = |reason: String| ProfileSourceError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    if base_url.trim().is_empty() {
        return Err(invalid("base URL is empty".to_string()));
    }

    let mut base = if base_url.starts_with("http://") || base_url.starts_with("https://") {
        base_url.to_string()
    } else {
        format!("http://{base_url}")
    };
    if !base.ends_with('/') {
        base.push('/');
    }

    let base = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
    base.join(path.trim_start_matches('/'))
        .map_err(|e| invalid(e.to_string()))
}
