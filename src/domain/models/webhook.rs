//! Payloads of a tenant's enrichment webhook.
//!
//! The webhook receives the ranked members of one leaderboard and answers
//! with free-form metadata per member id, using the same recognized keys as
//! profile store documents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::profile::{ProfileBatchResponse, ProfileDocument, ProfileQuery};

/// Request body posted to `{webhook}/leaderboards/enrich`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEnrichRequest {
    /// Members to enrich, in rank order
    pub members: Vec<WebhookMember>,
}

/// A ranked member as the webhook sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMember {
    /// Leaderboard the member was ranked on
    pub leaderboard_id: String,
    /// Member identifier
    pub id: String,
    /// Scores the rank was computed from
    pub scores: Vec<WebhookScore>,
    /// 1-based rank
    pub rank: u32,
}

/// One score of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookScore {
    /// Score value
    pub value: i64,
}

/// Webhook answer. Members it knows nothing about are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WebhookEnrichResponse {
    /// Metadata for each known member
    #[serde(default)]
    pub members: Vec<WebhookMemberData>,
}

/// Metadata returned for one member.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WebhookMemberData {
    /// Member identifier
    pub id: String,
    /// Free-form fields, read with the profile document keys
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl From<&ProfileQuery> for WebhookEnrichRequest {
    fn from(query: &ProfileQuery) -> Self {
        let members = query
            .members
            .iter()
            .map(|member| WebhookMember {
                leaderboard_id: query.leaderboard_id.clone(),
                id: member.public_id.clone(),
                scores: vec![WebhookScore {
                    value: member.score,
                }],
                rank: member.rank,
            })
            .collect();

        Self { members }
    }
}

impl From<WebhookEnrichResponse> for ProfileBatchResponse {
    fn from(response: WebhookEnrichResponse) -> Self {
        let documents = response
            .members
            .into_iter()
            .map(|member| ProfileDocument {
                account_id: member.id,
                data: member.metadata,
            })
            .collect();

        Self { documents }
    }
}
