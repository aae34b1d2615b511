//! Domain errors for the enrichment subsystem.
//!
//! Cache failures are soft: the orchestration logs them and degrades.
//! Profile source failures are hard and surface to the caller unchanged.

use thiserror::Error;

use crate::domain::models::Interrupted;

/// Errors returned by an [`EnrichmentCache`](crate::domain::ports::EnrichmentCache) backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

/// Result of an enrichment cache call.
pub type CacheResult<T> = Result<T, CacheError>;

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors returned by a [`ProfileSource`](crate::domain::ports::ProfileSource).
#[derive(Debug, Error)]
pub enum ProfileSourceError {
    #[error("Invalid profile source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Profile source request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Profile source returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode profile source response: {0}")]
    Decode(String),

    #[error("Profile source unavailable: {0}")]
    Unavailable(String),
}

/// Result of a profile source call.
pub type ProfileSourceResult<T> = Result<T, ProfileSourceError>;

impl ProfileSourceError {
    /// Returns true if the upstream answered with a server-side (5xx) status.
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 500)
    }
}

/// Errors surfaced by [`Enricher::enrich`](crate::domain::ports::Enricher::enrich).
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Could not enrich with profile source: {0}")]
    ProfileSource(#[from] ProfileSourceError),

    #[error("Enrichment cancelled by caller")]
    Cancelled,

    #[error("Enrichment deadline exceeded")]
    DeadlineExceeded,
}

/// Result of an enrich call.
pub type EnrichmentResult<T> = Result<T, EnrichmentError>;

impl From<Interrupted> for EnrichmentError {
    fn from(interrupted: Interrupted) -> Self {
        match interrupted {
            Interrupted::Cancelled => Self::Cancelled,
            Interrupted::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}
