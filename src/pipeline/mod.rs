//! Pipeline orchestration for tracking runs.
//!
//! A run goes session → profile → fetch → diff → render → persist. The
//! stages are exposed separately so CLI handlers and tests can drive them.

mod diff_stage;
mod fetch_stage;
mod output;
mod report_stage;

pub use diff_stage::{compute_diffs, CategoryDiff};
pub use fetch_stage::{fetch_lists, FetchedCategory, FetchedLists};
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::{
    output_report, output_unsaved, persist, render_blocks, use_color, Persisted,
};

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::fetch::FollowSource;
use crate::model::Profile;
use crate::reports::{format_timestamp, ChangelogEntry, RenderedBlock, RunReport};
use chrono::{DateTime, Local};

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct TrackOutcome {
    pub report: RunReport,
    /// Change sections and summary, in display order
    pub blocks: Vec<RenderedBlock>,
}

/// A run whose changes are computed and rendered but not yet saved.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    profile: Profile,
    warnings: Vec<String>,
    diffs: Vec<CategoryDiff>,
    timestamp: String,
    blocks: Vec<RenderedBlock>,
}

/// Fetch, diff and render one run against `source`. Nothing is written.
///
/// `at` stamps the changelog that [`PreparedRun::commit`] writes.
pub fn prepare(
    source: &mut dyn FollowSource,
    config: &TrackerConfig,
    at: DateTime<Local>,
    colored: bool,
) -> Result<PreparedRun> {
    let fetched = fetch_lists(source, config)?;
    let warnings = fetched.warnings();

    let diffs = compute_diffs(&config.store(), fetched.categories)?;
    let blocks = render_blocks(&diffs, &config.linker(), colored);

    Ok(PreparedRun {
        profile: fetched.profile,
        warnings,
        diffs,
        timestamp: format_timestamp(&at),
        blocks,
    })
}

impl PreparedRun {
    /// Change sections and summary, in display order.
    #[must_use]
    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    /// Write the changelog and snapshots, unless the config is a dry run.
    pub fn commit(&self, config: &TrackerConfig) -> Result<TrackOutcome> {
        let persisted = if config.dry_run {
            tracing::info!("Dry run: skipping snapshot and changelog writes");
            None
        } else {
            let entry = ChangelogEntry::new(&config.target, &self.timestamp, &self.blocks);
            Some(persist(&config.store(), &entry, &self.diffs)?)
        };

        let (snapshots, changelog) = match persisted {
            Some(p) => (p.snapshots, Some(p.changelog)),
            None => (Vec::new(), None),
        };

        let report = RunReport {
            target: config.target.clone(),
            profile: Some(self.profile.clone()),
            timestamp: self.timestamp.clone(),
            dry_run: config.dry_run,
            data_dir: config.data_dir.clone(),
            categories: self.diffs.iter().map(CategoryDiff::to_report).collect(),
            warnings: self.warnings.clone(),
            snapshots,
            changelog,
        };

        Ok(TrackOutcome {
            report,
            blocks: self.blocks.clone(),
        })
    }
}

/// Run one tracking pass against `source`: [`prepare`], then commit.
///
/// Nothing is written when the config is a dry run, or when the run aborts
/// before the persist stage.
pub fn track(
    source: &mut dyn FollowSource,
    config: &TrackerConfig,
    at: DateTime<Local>,
    colored: bool,
) -> Result<TrackOutcome> {
    prepare(source, config, at, colored)?.commit(config)
}

/// Exit codes of the `ig-tracker` binary
pub mod exit_codes {
    /// Run completed (changes or not)
    pub const SUCCESS: i32 = 0;
    /// Unexpected failure, e.g. a snapshot could not be written
    pub const FAILURE: i32 = 1;
    /// Aborted before any write: configuration, session, profile, or no data
    pub const ABORTED: i32 = 2;
}
