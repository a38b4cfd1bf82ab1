//! Track command handler.
//!
//! Implements the default command: one tracking run for the configured
//! target.

use crate::config::{ensure_valid, FileConfig, OutputConfig, TrackerConfig};
use crate::error::{Result as TrackerResult, TrackerError};
use crate::fetch::{FollowSource, InstagramClient};
use crate::pipeline::{exit_codes, output_report, output_unsaved, prepare, use_color};
use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;

/// Inputs for a tracking run, as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct TrackOptions {
    /// Explicit config file (`--config`)
    pub config_file: Option<PathBuf>,
    /// CLI flags and environment, layered over the config file
    pub overrides: FileConfig,
    pub dry_run: bool,
    pub output: OutputConfig,
    pub quiet: bool,
}

/// Run the track command, returning the desired exit code.
///
/// Fatal preconditions (configuration, session, profile, no data) print a
/// one-line diagnostic and yield [`exit_codes::ABORTED`]. Other failures
/// are returned as errors.
pub fn run_track(options: &TrackOptions) -> Result<i32> {
    let config = match resolve_config(options) {
        Ok(config) => config,
        Err(e) => return Ok(abort(&e)),
    };

    let mut client = match InstagramClient::new(config.client_config()) {
        Ok(client) => client,
        Err(e) => return Ok(abort(&e)),
    };

    run_with_source(&mut client, &config, options.quiet)
}

/// Merge the config layers and validate the result.
pub fn resolve_config(options: &TrackOptions) -> TrackerResult<TrackerConfig> {
    let (layer, loaded_from) =
        FileConfig::from_file_with_overrides(options.config_file.as_deref(), &options.overrides)
            .map_err(|e| TrackerError::config(e.to_string()))?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }

    let config = layer.resolve(options.dry_run, options.output.clone())?;
    ensure_valid(&config)?;
    Ok(config)
}

/// Run against an already constructed source and print the result.
pub fn run_with_source(
    source: &mut dyn FollowSource,
    config: &TrackerConfig,
    quiet: bool,
) -> Result<i32> {
    let prepared = match prepare(source, config, Local::now(), use_color(config)) {
        Ok(prepared) => prepared,
        Err(e) if e.is_fatal_precondition() => return Ok(abort(&e)),
        Err(e) => return Err(anyhow::Error::new(e).context("tracking run failed")),
    };

    match prepared.commit(config) {
        Ok(outcome) => {
            output_report(config, &outcome, quiet)?;
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => {
            output_unsaved(config, prepared.blocks(), quiet)?;
            Err(anyhow::Error::new(e).context("saving results failed"))
        }
    }
}

fn abort(err: &TrackerError) -> i32 {
    eprintln!("Error: {}", diagnostic(err));
    exit_codes::ABORTED
}

/// The error and its sources on one line.
fn diagnostic(err: &TrackerError) -> String {
    let mut line = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        line.push_str(": ");
        line.push_str(&cause.to_string());
        source = cause.source();
    }
    line
}
