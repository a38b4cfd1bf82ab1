//! Diff result structures.

use crate::model::IdentifierSet;
use serde::{Deserialize, Serialize};

/// Identifiers gained and lost between two snapshots of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    /// Present in the new snapshot, absent from the old one
    pub added: IdentifierSet,
    /// Present in the old snapshot, absent from the new one
    pub removed: IdentifierSet,
}

impl DiffResult {
    /// Net change: `added - removed`.
    #[must_use]
    pub fn net(&self) -> i64 {
        // Set sizes are far below i64::MAX.
        self.added.len() as i64 - self.removed.len() as i64
    }

    /// Whether anything was added or removed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let diff = DiffResult::default();
        assert!(!diff.has_changes());
        assert_eq!(diff.net(), 0);
    }

    #[test]
    fn test_net_is_signed() {
        let diff = DiffResult {
            added: ["a"].into_iter().collect(),
            removed: ["b", "c", "d"].into_iter().collect(),
        };
        assert_eq!(diff.net(), -2);
        assert!(diff.has_changes());
    }
}
