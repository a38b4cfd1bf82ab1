//! Diff stage: compare fetched lists with the stored snapshots.

use super::fetch_stage::FetchedCategory;
use crate::diff::{compute, DiffResult};
use crate::error::{ErrorContext, Result};
use crate::model::{Category, IdentifierSet};
use crate::reports::CategoryReport;
use crate::snapshot::SnapshotStore;

/// One category compared against its last snapshot.
#[derive(Debug, Clone)]
pub struct CategoryDiff {
    pub category: Category,
    pub fetched: bool,
    pub previous: IdentifierSet,
    pub current: IdentifierSet,
    pub diff: DiffResult,
}

impl CategoryDiff {
    #[must_use]
    pub fn to_report(&self) -> CategoryReport {
        CategoryReport {
            category: self.category,
            fetched: self.fetched,
            current_count: self.current.len(),
            previous_count: self.previous.len(),
            diff: self.diff.clone(),
            net: self.diff.net(),
        }
    }
}

/// Load the previous snapshot of every category and diff it.
pub fn compute_diffs(
    store: &SnapshotStore,
    fetched: Vec<FetchedCategory>,
) -> Result<Vec<CategoryDiff>> {
    tracing::info!("Comparing with last saved snapshot");
    fetched
        .into_iter()
        .map(|category| {
            let previous = store
                .load(category.category)
                .with_context(|| format!("loading previous {} snapshot", category.category))?;
            let diff = compute(&category.current, &previous);
            tracing::debug!(
                "{}: {} added, {} removed ({} -> {})",
                category.category,
                diff.added.len(),
                diff.removed.len(),
                previous.len(),
                category.current.len()
            );
            Ok(CategoryDiff {
                category: category.category,
                fetched: category.failure.is_none(),
                previous,
                current: category.current,
                diff,
            })
        })
        .collect()
}
