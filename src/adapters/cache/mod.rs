//! Enrichment cache adapters.
//!
//! `MokaEnrichmentCache` is the in-process TTL cache used in production;
//! `NullEnrichmentCache` stands in when caching is switched off.
//! `InstrumentedEnrichmentCache` wraps either with counters and timings.

pub mod instrumented;
pub mod moka_enrichment_cache;
pub mod null_enrichment_cache;

pub use instrumented::{CacheMetrics, CacheStats, InstrumentedEnrichmentCache};
pub use moka_enrichment_cache::MokaEnrichmentCache;
pub use null_enrichment_cache::NullEnrichmentCache;
