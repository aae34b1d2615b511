//! Domain layer for leaderboard profile enrichment
//!
//! This module contains the enrichment models, the port traits adapters
//! implement, and the error taxonomy shared by both.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{
    CacheError, CacheResult, EnrichmentError, EnrichmentResult, ProfileSourceError,
    ProfileSourceResult,
};
