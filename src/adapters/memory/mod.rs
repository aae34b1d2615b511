//! In-memory adapters used as test doubles.
//!
//! Both record the calls they receive and can be made to fail or stall,
//! which lets tests observe the enricher's call pattern.

pub mod enrichment_cache;
pub mod profile_source;

pub use enrichment_cache::{InMemoryEnrichmentCache, RecordedGet, RecordedSet};
pub use profile_source::InMemoryProfileSource;
