//! Instagram web API HTTP client.

use super::response::{ApiErrorBody, FriendshipsPage, ProfileResponse};
use crate::error::{FetchErrorKind, Result, TrackerError};
use crate::fetch::session::Session;
use crate::fetch::traits::{FollowSource, IdentifierStream};
use crate::model::{Category, Identifier, Profile};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

/// App id the web client identifies itself with.
const WEB_APP_ID: &str = "936619743392459";

/// Instagram client configuration.
#[derive(Debug, Clone)]
pub struct InstagramClientConfig {
    /// Base URL of the private web API
    pub api_base: String,
    /// Request timeout
    pub timeout: Duration,
    /// Users requested per page
    pub page_size: usize,
    /// Saved session to authenticate with
    pub session_file: PathBuf,
}

impl Default for InstagramClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://i.instagram.com".to_string(),
            timeout: Duration::from_secs(30),
            page_size: 50,
            session_file: PathBuf::from("session.json"),
        }
    }
}

/// HTTP client for the Instagram web API.
pub struct InstagramClient {
    client: Client,
    config: InstagramClientConfig,
    session: Option<Session>,
}

/// Helper to convert reqwest errors to fetch errors
fn network_error(category: Category, msg: &str, err: reqwest::Error) -> TrackerError {
    TrackerError::fetch(category, msg, FetchErrorKind::NetworkError(err.to_string()))
}

/// Helper to turn an error status into a fetch error
fn status_error(category: Category, response: Response) -> TrackerError {
    let status = response.status();
    let message = response
        .json::<ApiErrorBody>()
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_default();
    let detail = format!("status {} {message}", status.as_u16()).trim_end().to_string();

    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchErrorKind::NotPermitted(detail),
        _ => FetchErrorKind::ApiError(detail),
    };
    TrackerError::fetch(category, "listing request", kind)
}

impl InstagramClient {
    /// Create a new client. No request is made until a session is loaded.
    pub fn new(config: InstagramClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| TrackerError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            session: None,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &InstagramClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base.trim_end_matches('/'))
    }

    /// Attach session headers, if a session is loaded.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("X-IG-App-ID", WEB_APP_ID);
        match &self.session {
            Some(session) => {
                let request = request.header(reqwest::header::COOKIE, session.cookie_header());
                match session.csrf_token() {
                    Some(token) => request.header("X-CSRFToken", token),
                    None => request,
                }
            }
            None => request,
        }
    }

    /// Fetch one page of a follow list.
    fn fetch_page(
        &self,
        category: Category,
        user_id: &str,
        max_id: Option<&str>,
    ) -> Result<FriendshipsPage> {
        let url = self.url(&format!(
            "/api/v1/friendships/{user_id}/{}/",
            category.label()
        ));
        let mut query = vec![("count", self.config.page_size.to_string())];
        if let Some(cursor) = max_id {
            query.push(("max_id", cursor.to_string()));
        }

        tracing::debug!("GET {url} (cursor: {max_id:?})");
        let response = self
            .authorized(self.client.get(&url).query(&query))
            .send()
            .map_err(|e| network_error(category, "listing request failed", e))?;

        if !response.status().is_success() {
            return Err(status_error(category, response));
        }

        response.json().map_err(|e| {
            TrackerError::fetch(
                category,
                "parsing listing page",
                FetchErrorKind::InvalidResponse(e.to_string()),
            )
        })
    }
}

impl FollowSource for InstagramClient {
    fn name(&self) -> &'static str {
        "instagram"
    }

    fn authenticate(&mut self, account: &str) -> Result<()> {
        let session = Session::load(&self.config.session_file)?;
        tracing::info!(
            "Loaded session for @{account} from {}",
            self.config.session_file.display()
        );
        self.session = Some(session);
        Ok(())
    }

    fn lookup_profile(&self, username: &str) -> Result<Profile> {
        let url = self.url("/api/v1/users/web_profile_info/");
        tracing::debug!("GET {url} (username: {username})");

        let response = self
            .authorized(self.client.get(&url).query(&[("username", username)]))
            .send()
            .map_err(|e| TrackerError::profile_lookup(username, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TrackerError::profile_lookup(username, "profile does not exist"));
        }
        if !status.is_success() {
            return Err(TrackerError::profile_lookup(
                username,
                format!("status {}", status.as_u16()),
            ));
        }

        let body: ProfileResponse = response
            .json()
            .map_err(|e| TrackerError::profile_lookup(username, format!("invalid response: {e}")))?;

        body.data
            .user
            .map(Profile::from)
            .ok_or_else(|| TrackerError::profile_lookup(username, "profile does not exist"))
    }

    fn list<'a>(&'a self, profile: &'a Profile, category: Category) -> IdentifierStream<'a> {
        if self.session.is_none() {
            return Box::new(std::iter::once(Err(TrackerError::fetch(
                category,
                "listing request",
                FetchErrorKind::NotPermitted("no session loaded".to_string()),
            ))));
        }
        Box::new(PageIter {
            client: self,
            category,
            user_id: &profile.id,
            cursor: None,
            seen_cursors: HashSet::new(),
            buffer: VecDeque::new(),
            done: false,
        })
    }
}

/// Lazily walks the pages of one follow list.
struct PageIter<'a> {
    client: &'a InstagramClient,
    category: Category,
    user_id: &'a str,
    cursor: Option<String>,
    seen_cursors: HashSet<String>,
    buffer: VecDeque<Identifier>,
    done: bool,
}

impl Iterator for PageIter<'_> {
    type Item = Result<Identifier>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.buffer.pop_front() {
                return Some(Ok(id));
            }
            if self.done {
                return None;
            }

            let page = match self
                .client
                .fetch_page(self.category, self.user_id, self.cursor.as_deref())
            {
                Ok(page) => page,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            let next = page.next_max_id.clone();
            let repeated = next
                .as_ref()
                .is_some_and(|cursor| !self.seen_cursors.insert(cursor.clone()));
            if repeated {
                tracing::warn!("{} listing repeated a page cursor, stopping", self.category);
            }
            // An empty page ends the listing even if a cursor came back.
            self.done = next.is_none() || repeated || page.users.is_empty();
            self.cursor = next;
            self.buffer.extend(page.identifiers());
        }
    }
}
