//! Ranked leaderboard members.

use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// A ranked leaderboard entry.
///
/// `public_id`, `rank` and `score` come from the ranking engine and are never
/// changed by enrichment. Only the profile fields are written, and only for
/// members whose profile was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Identifier, unique within a leaderboard
    pub public_id: String,

    /// 1-based rank
    pub rank: u32,

    /// Score the rank was computed from
    pub score: i64,

    /// Display name resolved from the profile store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Avatar URL resolved from the profile store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Member {
    /// Create an unenriched member.
    pub fn new(public_id: impl Into<String>, rank: u32, score: i64) -> Self {
        Self {
            public_id: public_id.into(),
            rank,
            score,
            display_name: None,
            avatar_url: None,
        }
    }

    /// Copy profile fields onto this member.
    pub fn apply_profile(&mut self, profile: &Profile) {
        self.display_name.clone_from(&profile.display_name);
        self.avatar_url.clone_from(&profile.avatar_url);
    }

    /// The profile fields currently carried by this member.
    pub fn profile(&self) -> Profile {
        Profile {
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }

    /// Whether any profile field has been written.
    pub const fn is_enriched(&self) -> bool {
        self.display_name.is_some() || self.avatar_url.is_some()
    }
}
