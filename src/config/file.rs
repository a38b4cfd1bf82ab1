//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::FileConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".ig-tracker.yaml",
    ".ig-tracker.yml",
    "ig-tracker.yaml",
    "ig-tracker.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Current directory
/// 2. User config directory (~/.config/ig-tracker/)
/// 3. Home directory
#[must_use]
pub fn discover_config_file() -> Option<PathBuf> {
    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = dirs::config_dir()
        .and_then(|dir| find_config_in_dir(&dir.join(env!("CARGO_PKG_NAME"))))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load a config layer from a YAML file.
pub fn load_config_file(path: &Path) -> Result<FileConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    let config: FileConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load the explicit config file, or the discovered one.
///
/// An explicit path must exist. No file at all yields the default layer.
pub fn load_config(
    explicit_path: Option<&Path>,
) -> Result<(FileConfig, Option<PathBuf>), ConfigFileError> {
    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file(),
    };

    match path {
        Some(path) => {
            let config = load_config_file(&path)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok((config, Some(path)))
        }
        None => Ok((FileConfig::default(), None)),
    }
}

/// Load config from the explicit or discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (FileConfig, Option<PathBuf>) {
    load_config(explicit_path).unwrap_or_else(|e| {
        tracing::warn!("{e}");
        (FileConfig::default(), None)
    })
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl FileConfig {
    /// Merge another layer into this one, with `other` taking precedence.
    ///
    /// Used to put CLI flags and environment over the file.
    pub fn merge(&mut self, other: &Self) {
        if other.target.is_some() {
            self.target.clone_from(&other.target);
        }
        if other.account.is_some() {
            self.account.clone_from(&other.account);
        }
        if other.data_dir.is_some() {
            self.data_dir.clone_from(&other.data_dir);
        }
        if other.session_file.is_some() {
            self.session_file.clone_from(&other.session_file);
        }
        if other.profile_url_base.is_some() {
            self.profile_url_base.clone_from(&other.profile_url_base);
        }
        if other.on_malformed_snapshot.is_some() {
            self.on_malformed_snapshot = other.on_malformed_snapshot;
        }
        if other.fetch.is_some() {
            self.fetch.clone_from(&other.fetch);
        }
    }

    /// Load from file and merge with CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_config(config_path)?;
        config.merge(cli_overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# ig-tracker configuration
# =========================
#
# Place this file at:
#   - .ig-tracker.yaml in the working directory
#   - ~/.config/ig-tracker/ig-tracker.yaml for global config
#
# CLI arguments and environment variables always override file settings.

# Profile to track (env: TARGET_USERNAME)
# target: some_profile

# Account whose saved session is used (env: YOUR_IG_USERNAME)
# account: my_account

# Directory for followers.json, following.json and history/
data_dir: instagram_tracking

# Session cookie file (JSON object of cookie name to value).
# Default: ~/.config/ig-tracker/session-{account}.json
# session_file: ./session.json

# Prefix for profile links in reports
profile_url_base: https://instagram.com/

# Unparseable snapshot file: fail (abort the run) or reset (treat as empty)
on_malformed_snapshot: fail

# Instagram API settings
fetch:
  api_base: https://i.instagram.com
  timeout_secs: 30
  page_size: 50
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
