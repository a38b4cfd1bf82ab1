//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.

mod track;

pub use track::{resolve_config, run_track, run_with_source, TrackOptions};
