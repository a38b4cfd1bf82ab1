//! Configuration validation for ig-tracker.

use super::defaults::MAX_PAGE_SIZE;
use super::types::{FetchConfig, TrackerConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for TrackerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(validate_handle("target", &self.target));
        errors.extend(validate_handle("account", &self.account));
        errors.extend(validate_url("profile_url_base", &self.profile_url_base));

        if self.data_dir.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "data_dir".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if let Some(ref file_path) = self.output.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        errors.extend(self.fetch.validate());
        errors
    }
}

impl Validatable for FetchConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(validate_url("fetch.api_base", &self.api_base));

        if self.timeout_secs == 0 {
            errors.push(ConfigError {
                field: "fetch.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            errors.push(ConfigError {
                field: "fetch.page_size".to_string(),
                message: format!(
                    "must be between 1 and {MAX_PAGE_SIZE}, got {}",
                    self.page_size
                ),
            });
        }

        errors
    }
}

/// Handles end up in file names, so path separators are rejected.
fn validate_handle(field: &str, value: &str) -> Option<ConfigError> {
    let message = if value.trim().is_empty() {
        "must not be empty".to_string()
    } else if value.contains(['/', '\\']) || value == "." || value == ".." {
        format!("'{value}' is not a valid profile handle")
    } else if value.chars().any(char::is_whitespace) {
        format!("'{value}' must not contain whitespace")
    } else {
        return None;
    };
    Some(ConfigError {
        field: field.to_string(),
        message,
    })
}

fn validate_url(field: &str, value: &str) -> Option<ConfigError> {
    if value.starts_with("https://") || value.starts_with("http://") {
        None
    } else {
        Some(ConfigError {
            field: field.to_string(),
            message: format!("'{value}' must start with http:// or https://"),
        })
    }
}
