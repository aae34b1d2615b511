//! Enricher decorator running pre/post hooks around each call.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::domain::errors::EnrichmentResult;
use crate::domain::models::{EnrichmentReport, Member, RequestContext};
use crate::domain::ports::{EnrichCall, EnrichHook, Enricher};

/// Wraps any [`Enricher`] with a list of [`EnrichHook`]s.
///
/// `before` hooks run in registration order, `after` hooks in reverse, so
/// the first hook registered is the outermost.
pub struct HookedEnricher<E: Enricher> {
    inner: E,
    hooks: Vec<Arc<dyn EnrichHook>>,
}

impl<E: Enricher> HookedEnricher<E> {
    /// Wrap `inner` with no hooks registered.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            hooks: Vec::new(),
        }
    }

    /// Register `hook` inside the ones already added.
    #[must_use]
    pub fn with_hook(mut self, hook: Arc<dyn EnrichHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// The wrapped enricher.
    pub const fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E: Enricher> Enricher for HookedEnricher<E> {
    async fn enrich(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        leaderboard_id: &str,
        members: &mut [Member],
    ) -> EnrichmentResult<EnrichmentReport> {
        let call = EnrichCall {
            tenant_id,
            leaderboard_id,
            member_count: members.len(),
        };

        for hook in &self.hooks {
            hook.before(&call);
        }

        let start = Instant::now();
        let outcome = self
            .inner
            .enrich(ctx, tenant_id, leaderboard_id, members)
            .await;
        let elapsed = start.elapsed();

        for hook in self.hooks.iter().rev() {
            hook.after(&call, &outcome, elapsed);
        }

        outcome
    }
}
