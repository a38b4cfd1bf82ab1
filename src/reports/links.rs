//! Profile link construction.

use crate::model::{Identifier, IdentifierSet};

/// Default base URL for profile links.
pub const DEFAULT_PROFILE_URL_BASE: &str = "https://instagram.com/";

/// Expands identifiers into full profile URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLinker {
    base: String,
}

impl ProfileLinker {
    /// Create a linker for the given base URL. A trailing `/` is added if missing.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    #[must_use]
    pub fn link(&self, id: &Identifier) -> String {
        format!("{}{}", self.base, id)
    }

    /// Links for every identifier, in canonical order.
    #[must_use]
    pub fn links(&self, ids: &IdentifierSet) -> Vec<String> {
        ids.iter().map(|id| self.link(id)).collect()
    }
}

impl Default for ProfileLinker {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_URL_BASE)
    }
}
