//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces adapters must implement:
//! - EnrichmentCache: TTL overlay of resolved member profiles
//! - ProfileSource: batch lookup against the profile store or a tenant webhook
//! - Enricher: the orchestration capability itself
//! - EnrichHook: pre/post observers around the enrich boundary

pub mod enrich_hook;
pub mod enricher;
pub mod enrichment_cache;
pub mod profile_source;

pub use enrich_hook::{EnrichCall, EnrichHook};
pub use enricher::Enricher;
pub use enrichment_cache::{cache_key, CacheLookup, EnrichmentCache, CACHE_KEY_PREFIX};
pub use profile_source::ProfileSource;
