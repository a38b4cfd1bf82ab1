//! Configuration module for ig-tracker.
//!
//! Settings come from three layers, highest precedence first:
//! - CLI flags and environment variables (a `.env` file is loaded first)
//! - a YAML config file
//! - built-in defaults
//!
//! The layers are merged into a [`FileConfig`] and resolved once into a
//! [`TrackerConfig`], which is validated before any work starts.
//!
//! # Configuration File
//!
//! Place a `.ig-tracker.yaml` file in the working directory or
//! `~/.config/ig-tracker/`:
//!
//! ```yaml
//! target: some_profile
//! account: my_account
//! fetch:
//!   page_size: 100
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_API_BASE, DEFAULT_DATA_DIR, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, MAX_PAGE_SIZE,
};
pub use types::{FetchConfig, FileConfig, OutputConfig, TrackerConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_full_example_config, load_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};

use crate::error::{Result, TrackerError};

/// Generate a JSON Schema for the config file format.
///
/// This schema documents all options that can be set in `.ig-tracker.yaml`.
/// It can be used by editors for validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(FileConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

/// Turn validation errors into a single configuration error.
pub fn ensure_valid(config: &impl Validatable) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(TrackerError::config(message))
}
