//! Instagram web API response types.
//!
//! Only the fields the tracker reads are modelled; everything else in the
//! payloads is ignored.

use crate::model::{Identifier, Profile};
use serde::{Deserialize, Deserializer};

/// `web_profile_info` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub data: ProfileData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileData {
    /// `null` when the handle does not exist
    #[serde(default)]
    pub user: Option<UserInfo>,
}

/// Profile fields of `web_profile_info`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub edge_followed_by: Option<EdgeCount>,
    #[serde(default)]
    pub edge_follow: Option<EdgeCount>,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EdgeCount {
    pub count: u64,
}

impl From<UserInfo> for Profile {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name.filter(|n| !n.trim().is_empty()),
            follower_count: user.edge_followed_by.map(|e| e.count),
            following_count: user.edge_follow.map(|e| e.count),
            is_private: user.is_private,
        }
    }
}

/// One page of a `friendships/{id}/followers|following` listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FriendshipsPage {
    #[serde(default)]
    pub users: Vec<FriendshipUser>,
    /// Cursor for the next page; absent on the last page
    #[serde(default, deserialize_with = "cursor")]
    pub next_max_id: Option<String>,
}

impl FriendshipsPage {
    /// Handles on this page, in API order.
    pub fn identifiers(self) -> impl Iterator<Item = Identifier> {
        self.users.into_iter().map(|u| Identifier::new(u.username))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FriendshipUser {
    pub username: String,
}

/// Error payload returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// The cursor is sent as a string on some endpoints and a number on others.
fn cursor<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) if !s.is_empty() => Some(s),
        Some(Raw::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
