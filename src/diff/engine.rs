//! Diff computation.

use super::DiffResult;
use crate::model::{Identifier, IdentifierSet};
use std::collections::HashSet;

/// Compute the identifiers added to and removed from `old` to obtain `new`.
///
/// Membership is checked against hash sets, so the cost is linear in the
/// combined size of both inputs.
pub fn compute(new: &IdentifierSet, old: &IdentifierSet) -> DiffResult {
    let new_index: HashSet<&Identifier> = new.iter().collect();
    let old_index: HashSet<&Identifier> = old.iter().collect();

    let added = new
        .iter()
        .filter(|id| !old_index.contains(id))
        .cloned()
        .collect();
    let removed = old
        .iter()
        .filter(|id| !new_index.contains(id))
        .cloned()
        .collect();

    DiffResult { added, removed }
}

/// Like [`compute`], for unordered inputs that may contain duplicates.
pub fn compute_lists<N, O>(new: N, old: O) -> DiffResult
where
    N: IntoIterator,
    N::Item: Into<Identifier>,
    O: IntoIterator,
    O::Item: Into<Identifier>,
{
    let new: IdentifierSet = new.into_iter().collect();
    let old: IdentifierSet = old.into_iter().collect();
    compute(&new, &old)
}
