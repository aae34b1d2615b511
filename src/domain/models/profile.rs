//! Profile store payloads and the profile fields kept per member.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::member::Member;

/// Document key holding the player's display name.
pub const DISPLAY_NAME_KEY: &str = "player_name";

/// Document key holding the player's avatar URL.
pub const AVATAR_URL_KEY: &str = "picture_url";

/// Profile fields resolved for a single member.
///
/// This is the value the enrichment cache stores per
/// `(tenant, leaderboard, member)` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Player display name
    #[serde(rename = "player_name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Player avatar URL
    #[serde(rename = "picture_url", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// Extract the recognized fields from a document's data map.
    ///
    /// Unknown keys are ignored, as are recognized keys whose value is not a string.
    pub fn from_document_data(data: &HashMap<String, serde_json::Value>) -> Self {
        let string_field = |key: &str| {
            data.get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };

        Self {
            display_name: string_field(DISPLAY_NAME_KEY),
            avatar_url: string_field(AVATAR_URL_KEY),
        }
    }
}

/// Members whose profiles a [`ProfileSource`](crate::domain::ports::ProfileSource)
/// must resolve, with the leaderboard they were ranked on.
///
/// Each identifier appears once. Profile store adapters only need the
/// identifiers; webhook adapters forward rank and score as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileQuery {
    /// Tenant owning the leaderboard
    pub tenant_id: String,
    /// Leaderboard the members were ranked on
    pub leaderboard_id: String,
    /// Members to resolve, unenriched
    pub members: Vec<Member>,
}

impl ProfileQuery {
    /// Create a query for `members` of one leaderboard.
    pub fn new(
        tenant_id: impl Into<String>,
        leaderboard_id: impl Into<String>,
        members: Vec<Member>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            leaderboard_id: leaderboard_id.into(),
            members,
        }
    }

    /// Member identifiers in query order.
    pub fn account_ids(&self) -> Vec<String> {
        self.members.iter().map(|m| m.public_id.clone()).collect()
    }

    /// The profile store payload for this query.
    pub fn batch_request(&self) -> ProfileBatchRequest {
        ProfileBatchRequest {
            tenant_id: self.tenant_id.clone(),
            public_account_ids: self.account_ids(),
        }
    }
}

/// Batch lookup sent to the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileBatchRequest {
    /// Tenant owning the accounts
    pub tenant_id: String,
    /// Accounts to look up
    pub public_account_ids: Vec<String>,
}

/// Batch lookup answer. Unknown accounts are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileBatchResponse {
    /// One document per known account
    #[serde(default)]
    pub documents: Vec<ProfileDocument>,
}

/// A single account's public profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    /// Account the document belongs to
    #[serde(rename = "accountId")]
    pub account_id: String,

    /// Free-form profile fields
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl ProfileDocument {
    /// Build a document carrying the two recognized fields.
    pub fn new(
        account_id: impl Into<String>,
        display_name: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        let data = HashMap::from([
            (
                DISPLAY_NAME_KEY.to_string(),
                serde_json::Value::String(display_name.into()),
            ),
            (
                AVATAR_URL_KEY.to_string(),
                serde_json::Value::String(avatar_url.into()),
            ),
        ]);

        Self {
            account_id: account_id.into(),
            data,
        }
    }

    /// Recognized profile fields of this document.
    pub fn profile(&self) -> Profile {
        Profile::from_document_data(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_format() {
        let body = r#"{
            "documents": [
                {"accountId": "m1", "data": {"player_name": "Alice", "picture_url": "http://x/a.png", "level": 7}},
                {"accountId": "m3", "data": {"favourite_colour": "green"}}
            ]
        }"#;

        let response: ProfileBatchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.documents.len(), 2);

        let alice = response.documents[0].profile();
        assert_eq!(alice.display_name.as_deref(), Some("Alice"));
        assert_eq!(alice.avatar_url.as_deref(), Some("http://x/a.png"));

        let unknown_only = response.documents[1].profile();
        assert_eq!(unknown_only, Profile::default());
    }

    #[test]
    fn test_missing_documents_field_is_empty() {
        let response: ProfileBatchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.documents.is_empty());
    }

    #[test]
    fn test_non_string_recognized_value_is_ignored() {
        let data = HashMap::from([
            (DISPLAY_NAME_KEY.to_string(), serde_json::json!(42)),
            (AVATAR_URL_KEY.to_string(), serde_json::json!("http://x/b.png")),
        ]);

        let profile = Profile::from_document_data(&data);
        assert_eq!(profile.display_name, None);
        assert_eq!(profile.avatar_url.as_deref(), Some("http://x/b.png"));
    }

    #[test]
    fn test_query_builds_batch_request() {
        let query = ProfileQuery::new(
            "t1",
            "lb1",
            vec![Member::new("m1", 1, 100), Member::new("m3", 3, 80)],
        );

        assert_eq!(query.account_ids(), vec!["m1".to_string(), "m3".to_string()]);
        assert_eq!(
            query.batch_request(),
            ProfileBatchRequest {
                tenant_id: "t1".to_string(),
                public_account_ids: vec!["m1".to_string(), "m3".to_string()],
            }
        );
    }

    #[test]
    fn test_request_wire_format() {
        let request = ProfileBatchRequest {
            tenant_id: "t1".to_string(),
            public_account_ids: vec!["m1".to_string(), "m2".to_string()],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"tenant_id": "t1", "public_account_ids": ["m1", "m2"]})
        );
    }

    #[test]
    fn test_profile_serializes_with_document_keys() {
        let profile = Profile {
            display_name: Some("Bob".to_string()),
            avatar_url: None,
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"player_name":"Bob"}"#);
        assert_eq!(serde_json::from_str::<Profile>(&json).unwrap(), profile);
    }
}
