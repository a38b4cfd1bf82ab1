//! Per-category fetch results.

use super::IdentifierStream;
use crate::model::{Category, IdentifierSet};

/// Result of fetching one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The whole list was retrieved
    Fetched(IdentifierSet),
    /// The list could not be retrieved; treated as empty
    Failed { reason: String },
}

impl FetchOutcome {
    /// Drain a stream into an outcome.
    ///
    /// The first error discards everything collected so far for that
    /// category.
    pub fn collect(category: Category, stream: IdentifierStream<'_>) -> Self {
        let mut set = IdentifierSet::new();
        for item in stream {
            match item {
                Ok(id) => {
                    set.insert(id);
                }
                Err(e) => {
                    tracing::warn!("Could not fetch {category}: {e}");
                    return Self::Failed {
                        reason: e.to_string(),
                    };
                }
            }
        }
        tracing::debug!("Fetched {} {category}", set.len());
        Self::Fetched(set)
    }

    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    /// Failure reason, if the fetch failed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Fetched(_) => None,
            Self::Failed { reason } => Some(reason),
        }
    }

    /// The fetched set, or an empty set for a failed fetch.
    #[must_use]
    pub fn into_set(self) -> IdentifierSet {
        match self {
            Self::Fetched(set) => set,
            Self::Failed { .. } => IdentifierSet::new(),
        }
    }
}
