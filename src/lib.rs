//! **Track follower and following changes of a profile between runs.**
//!
//! `ig-tracker` fetches the current follower and following lists of a target
//! profile, compares them with the snapshot saved by the previous run, and
//! reports who was added and who was removed. Each non-dry run writes a
//! Markdown changelog and replaces the snapshots.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Identifier`] handles collected into a canonically
//!   ordered [`IdentifierSet`], plus the tracked [`Category`] and the
//!   resolved [`Profile`].
//! - **[`diff`]**: pure set comparison producing a [`DiffResult`].
//! - **[`snapshot`]**: the file-backed [`SnapshotStore`] with atomic writes.
//! - **[`reports`]**: change sections, the summary, Markdown changelogs, and
//!   the final summary/JSON output.
//! - **[`fetch`]**: the [`FollowSource`] trait and the Instagram client.
//! - **[`pipeline`]**: session → profile → fetch → diff → render → persist.
//!
//! ## Diffing Two Lists
//!
//! ```
//! use ig_tracker::diff::compute_lists;
//!
//! let diff = compute_lists(["alice", "carol"], ["alice", "bob"]);
//! assert_eq!(diff.added.to_sorted_vec(), vec!["carol"]);
//! assert_eq!(diff.removed.to_sorted_vec(), vec!["bob"]);
//! assert_eq!(diff.net(), 0);
//! ```
//!
//! ## Running a Tracking Pass
//!
//! Any [`FollowSource`] can drive the pipeline. [`StaticSource`] serves
//! fixed lists, which is handy offline:
//!
//! ```no_run
//! use ig_tracker::config::{FileConfig, OutputConfig};
//! use ig_tracker::fetch::StaticSource;
//! use ig_tracker::model::{Category, Profile};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FileConfig {
//!         target: Some("target".to_string()),
//!         account: Some("me".to_string()),
//!         ..FileConfig::default()
//!     }
//!     .resolve(true, OutputConfig::default())?;
//!
//!     let profile = Profile {
//!         id: "1".to_string(),
//!         username: "target".to_string(),
//!         full_name: None,
//!         follower_count: None,
//!         following_count: None,
//!         is_private: false,
//!     };
//!     let mut source = StaticSource::new(profile).with_list(Category::Followers, ["alice"]);
//!
//!     let outcome = ig_tracker::pipeline::track(&mut source, &config, chrono::Local::now(), false)?;
//!     println!("{} changes", outcome.report.categories.len());
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Counts are far below i64::MAX
    clippy::cast_possible_wrap
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod fetch;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod snapshot;

// Re-export main types for convenience
pub use config::{ConfigError, FileConfig, TrackerConfig, Validatable};
pub use diff::{compute, compute_lists, DiffResult};
pub use error::{ErrorContext, Result, TrackerError};
pub use fetch::{FetchOutcome, FollowSource, InstagramClient, StaticSource};
pub use model::{Category, Identifier, IdentifierSet, Profile};
pub use reports::{ChangelogEntry, ReportFormat, ReportGenerator, RunReport};
pub use snapshot::{MalformedSnapshotPolicy, SnapshotStore};
