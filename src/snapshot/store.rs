//! File-backed snapshot store.

use super::atomic_write;
use crate::error::{PersistenceErrorKind, Result, TrackerError};
use crate::model::{Category, IdentifierSet};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Name of the changelog directory inside the data directory.
pub const HISTORY_DIR_NAME: &str = "history";

/// What to do when a persisted snapshot cannot be parsed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedSnapshotPolicy {
    /// Abort the run with a persistence error
    #[default]
    Fail,
    /// Log a warning and treat the snapshot as absent
    Reset,
}

/// Reads and writes per-category snapshots under a data directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
    on_malformed: MalformedSnapshotPolicy,
}

impl SnapshotStore {
    /// Create a store rooted at `data_dir`. Nothing is touched on disk.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            on_malformed: MalformedSnapshotPolicy::default(),
        }
    }

    /// Set the policy for unparseable snapshot files.
    #[must_use]
    pub const fn with_malformed_policy(mut self, policy: MalformedSnapshotPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    /// Directory holding changelog files.
    pub fn history_dir(&self) -> PathBuf {
        self.data_dir.join(HISTORY_DIR_NAME)
    }

    /// Path of the snapshot file for a category.
    pub fn snapshot_path(&self, category: Category) -> PathBuf {
        self.data_dir.join(category.snapshot_file_name())
    }

    /// Load the last saved set for a category.
    ///
    /// A missing file yields an empty set.
    pub fn load(&self, category: Category) -> Result<IdentifierSet> {
        let path = self.snapshot_path(category);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No previous {} snapshot at {}", category, path.display());
                return Ok(IdentifierSet::new());
            }
            Err(e) => {
                return Err(TrackerError::persistence(
                    &path,
                    format!("reading {category} snapshot"),
                    PersistenceErrorKind::Io(e),
                ))
            }
        };

        match serde_json::from_str::<IdentifierSet>(&content) {
            Ok(set) => {
                tracing::debug!("Loaded {} {} from {}", set.len(), category, path.display());
                Ok(set)
            }
            Err(e) => match self.on_malformed {
                MalformedSnapshotPolicy::Fail => Err(TrackerError::persistence(
                    &path,
                    format!("parsing {category} snapshot"),
                    PersistenceErrorKind::Malformed(e.to_string()),
                )),
                MalformedSnapshotPolicy::Reset => {
                    tracing::warn!(
                        "Ignoring malformed {} snapshot at {}: {}",
                        category,
                        path.display(),
                        e
                    );
                    Ok(IdentifierSet::new())
                }
            },
        }
    }

    /// Replace the saved set for a category, returning the file written.
    pub fn save(&self, category: Category, set: &IdentifierSet) -> Result<PathBuf> {
        let path = self.snapshot_path(category);
        let mut json = serde_json::to_string_pretty(set).map_err(|e| {
            TrackerError::persistence(
                &path,
                format!("serializing {category} snapshot"),
                PersistenceErrorKind::Serialize(e.to_string()),
            )
        })?;
        json.push('\n');

        atomic_write(&path, json.as_bytes())?;
        tracing::debug!("Saved {} {} to {}", set.len(), category, path.display());
        Ok(path)
    }
}
