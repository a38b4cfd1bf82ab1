//! Report generation for tracking runs.
//!
//! - [`section`]: per-category change blocks and the summary block, each
//!   rendered for the terminal and as changelog Markdown
//! - [`ChangelogEntry`]: the one-file-per-run Markdown history
//! - [`SummaryReporter`] / [`JsonReporter`]: final run output

mod changelog;
mod json;
mod links;
pub mod section;
mod summary;
mod types;

pub use changelog::{format_timestamp, ChangelogEntry, TIMESTAMP_FORMAT};
pub use json::{CategoryReport, JsonReporter, RunReport};
pub use links::{ProfileLinker, DEFAULT_PROFILE_URL_BASE};
pub use section::{render, render_summary};
pub use summary::SummaryReporter;
pub use types::{RenderedBlock, ReportFormat};

use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for run report generators
pub trait ReportGenerator {
    /// Render the final output of a run.
    ///
    /// `blocks` are the already-rendered change and summary sections.
    fn generate(&self, report: &RunReport, blocks: &[RenderedBlock]) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter(format: ReportFormat, use_color: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
