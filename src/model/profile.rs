//! Resolved target profile.

use serde::{Deserialize, Serialize};

/// A profile resolved by the fetch adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Service-internal numeric id, used to address follow lists
    pub id: String,
    /// Public handle
    pub username: String,
    /// Display name, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Follower count reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    /// Following count reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_count: Option<u64>,
    #[serde(default)]
    pub is_private: bool,
}

impl Profile {
    /// Name to show to the user: full name when present, otherwise the handle.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(full_name: Option<&str>) -> Profile {
        Profile {
            id: "42".to_string(),
            username: "target".to_string(),
            full_name: full_name.map(str::to_string),
            follower_count: None,
            following_count: None,
            is_private: false,
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(profile(Some("Target Person")).display_name(), "Target Person");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(profile(None).display_name(), "target");
        assert_eq!(profile(Some("  ")).display_name(), "target");
    }
}
