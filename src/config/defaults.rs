//! Default values for ig-tracker settings.

/// Data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "instagram_tracking";

/// Base URL of the Instagram web API.
pub const DEFAULT_API_BASE: &str = "https://i.instagram.com";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Users per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Largest page the listing endpoints accept.
pub const MAX_PAGE_SIZE: usize = 200;
