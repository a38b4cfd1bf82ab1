//! Report stage: render, persist, and print run results.

use super::diff_stage::CategoryDiff;
use super::{should_use_color, write_output, OutputTarget, TrackOutcome};
use crate::config::TrackerConfig;
use crate::error::{ErrorContext, Result};
use crate::reports::{
    create_reporter, render, render_summary, ChangelogEntry, ProfileLinker, RenderedBlock,
    ReportFormat,
};
use crate::snapshot::SnapshotStore;
use std::path::PathBuf;

/// Render the change section of every category, then the summary.
#[must_use]
pub fn render_blocks(
    diffs: &[CategoryDiff],
    linker: &ProfileLinker,
    colored: bool,
) -> Vec<RenderedBlock> {
    let mut blocks: Vec<_> = diffs
        .iter()
        .map(|d| render(d.category, &d.diff, linker, colored))
        .collect();

    let summary: Vec<_> = diffs.iter().map(|d| (d.category, &d.diff)).collect();
    blocks.push(render_summary(&summary, colored));
    blocks
}

/// Files written by [`persist`].
#[derive(Debug, Clone)]
pub struct Persisted {
    pub changelog: PathBuf,
    pub snapshots: Vec<PathBuf>,
}

/// Write the changelog, then replace every snapshot.
///
/// The changelog goes first: if it cannot be created, the previous
/// snapshots are left untouched.
pub fn persist(
    store: &SnapshotStore,
    entry: &ChangelogEntry,
    diffs: &[CategoryDiff],
) -> Result<Persisted> {
    let changelog = entry.write_to(&store.history_dir())?;
    tracing::debug!("Changelog written to {}", changelog.display());

    let snapshots = diffs
        .iter()
        .map(|d| {
            store
                .save(d.category, &d.current)
                .with_context(|| format!("saving {} snapshot", d.category))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Persisted {
        changelog,
        snapshots,
    })
}

/// Whether the terminal blocks should carry color.
#[must_use]
pub fn use_color(config: &TrackerConfig) -> bool {
    let target = OutputTarget::from_option(config.output.file.clone());
    config.output.format == ReportFormat::Summary
        && target.is_terminal()
        && should_use_color(config.output.no_color)
}

/// Print the run result to the configured destination.
pub fn output_report(
    config: &TrackerConfig,
    outcome: &TrackOutcome,
    quiet: bool,
) -> anyhow::Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let reporter = create_reporter(config.output.format, use_color(config));
    let report = reporter.generate(&outcome.report, &outcome.blocks)?;
    write_output(&report, &target, quiet)
}

/// Print the change sections of a run whose results could not be saved.
///
/// Only the summary format gets them; JSON consumers see the failure
/// through the exit code alone.
pub fn output_unsaved(
    config: &TrackerConfig,
    blocks: &[RenderedBlock],
    quiet: bool,
) -> anyhow::Result<()> {
    if config.output.format != ReportFormat::Summary {
        return Ok(());
    }
    let target = OutputTarget::from_option(config.output.file.clone());
    let mut sections: Vec<_> = blocks.iter().map(|b| b.display.clone()).collect();
    sections.push("Changes were not saved.".to_string());
    write_output(&sections.join("\n\n"), &target, quiet)
}
