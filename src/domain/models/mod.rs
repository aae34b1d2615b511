//! Domain value types.

pub mod config;
pub mod member;
pub mod profile;
pub mod report;
pub mod request_context;
pub mod webhook;

pub use config::{CacheConfig, Config, EnrichmentConfig, LoggingConfig, ProfileSourceConfig};
pub use member::Member;
pub use profile::{
    Profile, ProfileBatchRequest, ProfileBatchResponse, ProfileDocument, ProfileQuery,
    AVATAR_URL_KEY, DISPLAY_NAME_KEY,
};
pub use report::EnrichmentReport;
pub use request_context::{Interrupted, RequestContext};
pub use webhook::{
    WebhookEnrichRequest, WebhookEnrichResponse, WebhookMember, WebhookMemberData, WebhookScore,
};
