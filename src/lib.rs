//! Leaderboard profile enrichment
//!
//! Attaches player display names and avatar URLs to ranked leaderboard
//! members, reading through a TTL cache before falling back to a batch
//! lookup against the profile store.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, port traits and errors
//! - **Adapters** (`adapters`): Cache backends and profile source clients
//! - **Service Layer** (`services`): Cache-aside orchestration and hooks
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use leaderboard_enrichment::adapters::cache::MokaEnrichmentCache;
//! use leaderboard_enrichment::adapters::profile_source::HttpProfileSource;
//! use leaderboard_enrichment::{CachedEnricher, Enricher, Member, ProfileSourceConfig, RequestContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = HttpProfileSource::new(&ProfileSourceConfig {
//!         base_url: "profiles.internal:8080".to_string(),
//!         ..Default::default()
//!     })?;
//!     let enricher = CachedEnricher::new(Arc::new(MokaEnrichmentCache::new()), Arc::new(source));
//!
//!     let mut members = vec![Member::new("m1", 1, 300), Member::new("m2", 2, 250)];
//!     let report = enricher
//!         .enrich(&RequestContext::new(), "t1", "lb1", &mut members)
//!         .await?;
//!     println!("{} fetched, {} unresolved", report.fetched, report.unresolved);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{CacheError, EnrichmentError, ProfileSourceError};
pub use domain::models::{
    CacheConfig, Config, EnrichmentConfig, EnrichmentReport, LoggingConfig, Member, Profile,
    ProfileBatchRequest, ProfileBatchResponse, ProfileDocument, ProfileQuery, ProfileSourceConfig,
    RequestContext,
};
pub use domain::ports::{EnrichHook, Enricher, EnrichmentCache, ProfileSource};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CachedEnricher, CallStatsHook, HookedEnricher, TracingHook};
