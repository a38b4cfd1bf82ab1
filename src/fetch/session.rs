//! Saved login sessions.
//!
//! A session file is a JSON object mapping cookie names to values, as
//! exported from a logged-in browser:
//!
//! ```json
//! { "sessionid": "...", "csrftoken": "...", "ds_user_id": "..." }
//! ```

use crate::error::{Result, SessionErrorKind, TrackerError};
use std::collections::BTreeMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Cookie that carries the login.
pub const SESSION_COOKIE: &str = "sessionid";

/// Cookie that carries the CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Default location of the session file for `account`.
///
/// `{config_dir}/ig-tracker/session-{account}.json`
#[must_use]
pub fn default_session_path(account: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(env!("CARGO_PKG_NAME"))
            .join(format!("session-{account}.json"))
    })
}

/// Cookies of a logged-in session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    cookies: BTreeMap<String, String>,
}

impl Session {
    /// Load and validate a session file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            let kind = if e.kind() == ErrorKind::NotFound {
                SessionErrorKind::NotFound(path.to_path_buf())
            } else {
                SessionErrorKind::Unreadable(e.to_string())
            };
            TrackerError::session(format!("loading {}", path.display()), kind)
        })?;

        Self::from_json(&text)
            .map_err(|kind| TrackerError::session(format!("loading {}", path.display()), kind))
    }

    /// Parse a cookie map.
    pub fn from_json(text: &str) -> std::result::Result<Self, SessionErrorKind> {
        let cookies: BTreeMap<String, String> = serde_json::from_str(text)
            .map_err(|e| SessionErrorKind::InvalidFormat(e.to_string()))?;

        let has_login = cookies
            .get(SESSION_COOKIE)
            .is_some_and(|v| !v.trim().is_empty());
        if !has_login {
            return Err(SessionErrorKind::MissingCookie(SESSION_COOKIE.to_string()));
        }

        Ok(Self { cookies })
    }

    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn csrf_token(&self) -> Option<&str> {
        self.cookie(CSRF_COOKIE)
    }

    /// Value for a `Cookie` request header.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// Cookie values are credentials; keep them out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cookies", &self.cookies.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_cookie_map() {
        let session =
            Session::from_json(r#"{"sessionid": "abc", "csrftoken": "tok", "ds_user_id": "7"}"#)
                .unwrap();
        assert_eq!(session.cookie("sessionid"), Some("abc"));
        assert_eq!(session.csrf_token(), Some("tok"));
        assert_eq!(session.cookie_header(), "csrftoken=tok; ds_user_id=7; sessionid=abc");
    }

    #[test]
    fn test_missing_sessionid() {
        let err = Session::from_json(r#"{"csrftoken": "tok"}"#).unwrap_err();
        assert!(matches!(err, SessionErrorKind::MissingCookie(_)));

        let err = Session::from_json(r#"{"sessionid": "  "}"#).unwrap_err();
        assert!(matches!(err, SessionErrorKind::MissingCookie(_)));
    }

    #[test]
    fn test_invalid_format() {
        let err = Session::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, SessionErrorKind::InvalidFormat(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Session::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Session {
                source: SessionErrorKind::NotFound(_),
                ..
            }
        ));
        assert!(err.is_fatal_precondition());
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"sessionid": "abc"}"#).unwrap();
        assert_eq!(Session::load(&path).unwrap().cookie("sessionid"), Some("abc"));
    }

    #[test]
    fn test_debug_hides_values() {
        let session = Session::from_json(r#"{"sessionid": "secret"}"#).unwrap();
        assert!(!format!("{session:?}").contains("secret"));
    }
}
