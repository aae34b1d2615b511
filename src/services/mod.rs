//! Enrichment orchestration and its call hooks.

pub mod cached_enricher;
pub mod hooked_enricher;
pub mod hooks;

pub use cached_enricher::{CachedEnricher, DEFAULT_CACHE_TTL};
pub use hooked_enricher::HookedEnricher;
pub use hooks::{CallStats, CallStatsHook, TracingHook};
