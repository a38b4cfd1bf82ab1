//! Configuration types for ig-tracker.

use super::defaults::{
    DEFAULT_API_BASE, DEFAULT_DATA_DIR, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};
use crate::error::{Result, TrackerError};
use crate::fetch::{default_session_path, InstagramClientConfig};
use crate::reports::{ProfileLinker, ReportFormat, DEFAULT_PROFILE_URL_BASE};
use crate::snapshot::{MalformedSnapshotPolicy, SnapshotStore};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// File / override layer
// ============================================================================

/// One configuration layer: the YAML file, or CLI flags and environment.
///
/// Every field is optional so layers can be merged; see
/// [`FileConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Profile handle to track
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Account the saved session belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Directory for snapshots and history (default: `instagram_tracking`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Session cookie file (default: `{config_dir}/ig-tracker/session-{account}.json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
    /// Prefix for profile links in reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url_base: Option<String>,
    /// What to do with an unparseable snapshot file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_malformed_snapshot: Option<MalformedSnapshotPolicy>,
    /// Instagram API settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchConfig>,
}

/// Instagram API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Base URL of the web API
    pub api_base: String,
    /// Per-request timeout in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
    /// Users requested per listing page
    #[schemars(range(min = 1, max = 200))]
    pub page_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ============================================================================
// Resolved configuration
// ============================================================================

/// Fully resolved settings for one run.
///
/// Built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerConfig {
    pub target: String,
    pub account: String,
    pub data_dir: PathBuf,
    pub session_file: PathBuf,
    pub profile_url_base: String,
    pub on_malformed_snapshot: MalformedSnapshotPolicy,
    pub fetch: FetchConfig,
    /// Compute and show, but write nothing
    pub dry_run: bool,
    pub output: OutputConfig,
}

/// Where and how the run result is printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputConfig {
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    pub file: Option<PathBuf>,
    pub no_color: bool,
}

impl FileConfig {
    /// Resolve this layer into run settings, filling defaults.
    ///
    /// Fails when the target or the account is missing.
    pub fn resolve(self, dry_run: bool, output: OutputConfig) -> Result<TrackerConfig> {
        let target = required(self.target, "target", "TARGET_USERNAME")?;
        let account = required(self.account, "account", "YOUR_IG_USERNAME")?;
        let data_dir = self
            .data_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let session_file = match self.session_file {
            Some(path) => path,
            None => default_session_path(&account)
                .unwrap_or_else(|| data_dir.join(format!("session-{account}.json"))),
        };

        Ok(TrackerConfig {
            target,
            account,
            data_dir,
            session_file,
            profile_url_base: self
                .profile_url_base
                .unwrap_or_else(|| DEFAULT_PROFILE_URL_BASE.to_string()),
            on_malformed_snapshot: self.on_malformed_snapshot.unwrap_or_default(),
            fetch: self.fetch.unwrap_or_default(),
            dry_run,
            output,
        })
    }
}

fn required(value: Option<String>, field: &str, env_var: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            TrackerError::config(format!(
                "{field} is not set (use --{field}, {env_var}, or the config file)"
            ))
        })
}

impl TrackerConfig {
    /// Snapshot store rooted at the data directory.
    #[must_use]
    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.data_dir).with_malformed_policy(self.on_malformed_snapshot)
    }

    #[must_use]
    pub fn linker(&self) -> ProfileLinker {
        ProfileLinker::new(&self.profile_url_base)
    }

    /// Settings for the Instagram client.
    #[must_use]
    pub fn client_config(&self) -> InstagramClientConfig {
        InstagramClientConfig {
            api_base: self.fetch.api_base.clone(),
            timeout: Duration::from_secs(self.fetch.timeout_secs),
            page_size: self.fetch.page_size,
            session_file: self.session_file.clone(),
        }
    }
}
