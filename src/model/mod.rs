//! Core data model for follower tracking.
//!
//! Account handles are wrapped in [`Identifier`] and collected into
//! [`IdentifierSet`], which keeps a canonical sort order so diffs and
//! persisted snapshots are deterministic.

mod category;
mod identifiers;
mod profile;

pub use category::Category;
pub use identifiers::{Identifier, IdentifierSet};
pub use profile::Profile;
