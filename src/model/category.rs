//! Tracked relationship categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the follow graph a set of identifiers describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Accounts following the target
    Followers,
    /// Accounts the target follows
    Following,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Self; 2] = [Self::Followers, Self::Following];

    /// Lowercase label used in logs and file names.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Followers => "followers",
            Self::Following => "following",
        }
    }

    /// Capitalized label used in changelog headings and summaries.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Followers => "Followers",
            Self::Following => "Following",
        }
    }

    /// File name of the persisted snapshot for this category.
    #[must_use]
    pub const fn snapshot_file_name(&self) -> &'static str {
        match self {
            Self::Followers => "followers.json",
            Self::Following => "following.json",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Category::Followers.to_string(), "followers");
        assert_eq!(Category::Following.title(), "Following");
        assert_eq!(Category::Following.snapshot_file_name(), "following.json");
    }

    #[test]
    fn test_report_order() {
        assert_eq!(Category::ALL, [Category::Followers, Category::Following]);
    }
}
