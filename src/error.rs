//! Unified error types for ig-tracker.
//!
//! Fatal run conditions (configuration, session, profile lookup, no data)
//! each have their own variant so the binary can print a one-line
//! diagnostic and choose an exit code without inspecting message text.

use crate::model::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ig-tracker operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TrackerError {
    /// Missing or invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The saved session could not be loaded
    #[error("Failed to load session: {context}")]
    Session {
        context: String,
        #[source]
        source: SessionErrorKind,
    },

    /// The target profile could not be resolved
    #[error("Could not load profile '{username}': {reason}")]
    ProfileLookup { username: String, reason: String },

    /// Fetching one category failed
    #[error("Could not fetch {category}: {context}")]
    Fetch {
        category: Category,
        context: String,
        #[source]
        source: FetchErrorKind,
    },

    /// Neither followers nor following could be retrieved
    #[error("No follower/following data retrieved")]
    NoData,

    /// A persisted snapshot or changelog could not be read or written
    #[error("Persistence error at {}: {context}", path.display())]
    Persistence {
        path: PathBuf,
        context: String,
        #[source]
        source: PersistenceErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {}: {message}", path.display())]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific session error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SessionErrorKind {
    #[error("session file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("session file is not a JSON cookie map: {0}")]
    InvalidFormat(String),

    #[error("session file has no '{0}' cookie")]
    MissingCookie(String),

    #[error("cannot read session file: {0}")]
    Unreadable(String),
}

/// Specific fetch error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FetchErrorKind {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Not permitted: {0}")]
    NotPermitted(String),
}

/// Specific persistence error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PersistenceErrorKind {
    #[error("Malformed snapshot: {0}")]
    Malformed(String),

    #[error("Changelog already exists")]
    AlreadyExists,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Serialize(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for ig-tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl TrackerError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a session error with context
    pub fn session(context: impl Into<String>, source: SessionErrorKind) -> Self {
        Self::Session {
            context: context.into(),
            source,
        }
    }

    /// Create a profile lookup error
    pub fn profile_lookup(username: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProfileLookup {
            username: username.into(),
            reason: reason.into(),
        }
    }

    /// Create a fetch error for one category
    pub fn fetch(category: Category, context: impl Into<String>, source: FetchErrorKind) -> Self {
        Self::Fetch {
            category,
            context: context.into(),
            source,
        }
    }

    /// Create a persistence error with path context
    pub fn persistence(
        path: impl Into<PathBuf>,
        context: impl Into<String>,
        source: PersistenceErrorKind,
    ) -> Self {
        Self::Persistence {
            path: path.into(),
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
            source,
        }
    }

    /// Whether this error aborts a run before any file is written.
    ///
    /// Persistence and IO failures happen while writing and are reported
    /// as internal failures instead.
    #[must_use]
    pub const fn is_fatal_precondition(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Session { .. } | Self::ProfileLookup { .. } | Self::NoData
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
///
/// ```ignore
/// use ig_tracker::error::ErrorContext;
///
/// let set = store.load(Category::Followers).context("loading previous snapshot")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<TrackerError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: TrackerError, new_ctx: &str) -> TrackerError {
    match err {
        TrackerError::Config(msg) => TrackerError::Config(chain_context(new_ctx, &msg)),
        TrackerError::Session { context, source } => TrackerError::Session {
            context: chain_context(new_ctx, &context),
            source,
        },
        TrackerError::ProfileLookup { username, reason } => TrackerError::ProfileLookup {
            username,
            reason: chain_context(new_ctx, &reason),
        },
        TrackerError::Fetch {
            category,
            context,
            source,
        } => TrackerError::Fetch {
            category,
            context: chain_context(new_ctx, &context),
            source,
        },
        TrackerError::NoData => TrackerError::NoData,
        TrackerError::Persistence {
            path,
            context,
            source,
        } => TrackerError::Persistence {
            path,
            context: chain_context(new_ctx, &context),
            source,
        },
        TrackerError::Io {
            path,
            message,
            source,
        } => TrackerError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
