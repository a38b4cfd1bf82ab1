//! Markdown changelog files.
//!
//! One file per run, named `{timestamp}_{target}.md` inside the history
//! directory. Files are created exclusively and never rewritten.

use super::RenderedBlock;
use crate::error::{PersistenceErrorKind, Result, TrackerError};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// `strftime` pattern for run timestamps (`YYYY-MM-DD_HH-MM-SS`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Format a run time the way changelog names and headers expect.
#[must_use]
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// The changelog of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    target: String,
    timestamp: String,
    lines: Vec<String>,
}

impl ChangelogEntry {
    /// Assemble an entry from rendered blocks, in order.
    pub fn new<'a>(
        target: impl Into<String>,
        timestamp: impl Into<String>,
        blocks: impl IntoIterator<Item = &'a RenderedBlock>,
    ) -> Self {
        let timestamp = timestamp.into();
        let mut lines = vec![
            format!("# Instagram Tracker Report \u{2013} {timestamp}"),
            String::new(),
        ];
        for block in blocks {
            lines.extend(block.log_lines.iter().cloned());
        }
        Self {
            target: target.into(),
            timestamp,
            lines,
        }
    }

    /// File name inside the history directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}_{}.md", self.timestamp, self.target)
    }

    #[must_use]
    pub fn to_markdown(&self) -> String {
        self.lines.join("\n")
    }

    /// Write the entry into `history_dir`, creating the directory if needed.
    ///
    /// Fails if a changelog with the same name already exists.
    pub fn write_to(&self, history_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(history_dir).map_err(|e| TrackerError::io(history_dir, e))?;

        let path = history_dir.join(self.file_name());
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                let kind = if e.kind() == ErrorKind::AlreadyExists {
                    PersistenceErrorKind::AlreadyExists
                } else {
                    PersistenceErrorKind::Io(e)
                };
                TrackerError::persistence(&path, "creating changelog", kind)
            })?;

        let written = file.write_all(self.to_markdown().as_bytes());
        drop(file);
        discard_on_error(&path, written)?;

        Ok(path)
    }
}

/// Remove a partially written changelog so a failed run leaves no file.
fn discard_on_error(path: &Path, written: std::io::Result<()>) -> Result<()> {
    written.map_err(|e| {
        if let Err(remove_err) = fs::remove_file(path) {
            tracing::warn!(
                "Could not remove partial changelog {}: {remove_err}",
                path.display()
            );
        }
        TrackerError::persistence(path, "writing changelog", PersistenceErrorKind::Io(e))
    })
}
