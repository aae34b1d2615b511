//! Profile source adapters: the shared profile store, tenant webhooks and
//! the router choosing between them.

pub mod client;
pub mod router;
pub mod webhook;

pub use client::HttpProfileSource;
pub use router::ProfileSourceRouter;
pub use webhook::{HttpWebhookSource, WEBHOOK_ENRICH_PATH};
