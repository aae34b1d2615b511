//! Hooks run before and after each `enrich` call.
//!
//! Cross-cutting concerns (logging, metrics, auditing) attach here instead
//! of inside the orchestration.

use std::time::Duration;

use crate::domain::errors::EnrichmentResult;
use crate::domain::models::EnrichmentReport;

/// Identifies the call a hook is observing.
#[derive(Debug, Clone, Copy)]
pub struct EnrichCall<'a> {
    /// Tenant the batch belongs to
    pub tenant_id: &'a str,
    /// Leaderboard the batch was ranked on
    pub leaderboard_id: &'a str,
    /// Members in the batch
    pub member_count: usize,
}

/// Observer of the enrich boundary.
pub trait EnrichHook: Send + Sync {
    /// Called before the wrapped enricher runs.
    fn before(&self, _call: &EnrichCall<'_>) {}

    /// Called with the outcome and the time the wrapped enricher took.
    fn after(
        &self,
        _call: &EnrichCall<'_>,
        _outcome: &EnrichmentResult<EnrichmentReport>,
        _elapsed: Duration,
    ) {
    }
}
