//! Per-call enrichment outcome.

use serde::Serialize;

/// Summary of one `enrich` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentReport {
    /// Members in the batch
    pub total: usize,
    /// Members served from the enrichment cache
    pub cache_hits: usize,
    /// Members resolved by the profile source
    pub fetched: usize,
    /// Members left without profile data
    pub unresolved: usize,
    /// Whether the tenant was skipped by configuration
    pub skipped: bool,
}

impl EnrichmentReport {
    /// Report for a batch that was returned untouched.
    pub const fn skipped(total: usize) -> Self {
        Self {
            total,
            cache_hits: 0,
            fetched: 0,
            unresolved: total,
            skipped: true,
        }
    }
}
