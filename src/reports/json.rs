//! Structured run report and its JSON rendering.

use super::{ReportError, ReportFormat, ReportGenerator, RenderedBlock};
use crate::diff::DiffResult;
use crate::model::{Category, Profile};
use serde::Serialize;
use std::path::PathBuf;

/// Everything one tracking run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Tracked profile handle
    pub target: String,
    /// Resolved profile details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    /// Run timestamp (`YYYY-MM-DD_HH-MM-SS`, local time)
    pub timestamp: String,
    /// Whether persistent writes were suppressed
    pub dry_run: bool,
    /// Directory holding snapshots and history
    pub data_dir: PathBuf,
    /// Per-category results, in report order
    pub categories: Vec<CategoryReport>,
    /// Recovered problems (e.g. one category could not be fetched)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Snapshot files written by this run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<PathBuf>,
    /// Changelog file written by this run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<PathBuf>,
}

impl RunReport {
    /// Result for one category, if present.
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Whether any category changed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.categories.iter().any(|c| c.diff.has_changes())
    }
}

/// Result for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    /// `false` when the fetch failed and an empty set was used instead
    pub fetched: bool,
    pub current_count: usize,
    pub previous_count: usize,
    #[serde(flatten)]
    pub diff: DiffResult,
    pub net: i64,
}

/// Pretty-printed JSON reporter
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, report: &RunReport, _blocks: &[RenderedBlock]) -> Result<String, ReportError> {
        serde_json::to_string_pretty(report)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compute_lists;

    fn sample_report() -> RunReport {
        let diff = compute_lists(["b", "c"], ["a", "b"]);
        RunReport {
            target: "target".to_string(),
            profile: None,
            timestamp: "2024-03-09_07-05-01".to_string(),
            dry_run: true,
            data_dir: PathBuf::from("instagram_tracking"),
            categories: vec![CategoryReport {
                category: Category::Followers,
                fetched: true,
                current_count: 2,
                previous_count: 2,
                net: diff.net(),
                diff,
            }],
            warnings: vec![],
            snapshots: vec![],
            changelog: None,
        }
    }

    #[test]
    fn test_json_shape() {
        let json = JsonReporter::new().generate(&sample_report(), &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["target"], "target");
        assert_eq!(value["dry_run"], true);
        let followers = &value["categories"][0];
        assert_eq!(followers["category"], "followers");
        assert_eq!(followers["added"], serde_json::json!(["c"]));
        assert_eq!(followers["removed"], serde_json::json!(["a"]));
        assert_eq!(followers["net"], 0);
        assert!(value.get("changelog").is_none());
    }

    #[test]
    fn test_category_lookup() {
        let report = sample_report();
        assert!(report.category(Category::Followers).is_some());
        assert!(report.category(Category::Following).is_none());
        assert!(report.has_changes());
    }
}
