//! HTTP behaviour of the Instagram adapter against a mock server.
//!
//! The adapter uses a blocking client, so the mock server is driven from a
//! dedicated runtime and requests are made outside of it.

use ig_tracker::error::{FetchErrorKind, TrackerError};
use ig_tracker::fetch::{FetchOutcome, FollowSource, InstagramClient, InstagramClientConfig};
use ig_tracker::model::{Category, Profile};
use serde_json::{json, Value};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

const FOLLOWERS_PATH: &str = "/api/v1/friendships/1234/followers/";
const PROFILE_PATH: &str = "/api/v1/users/web_profile_info/";

// ============================================================================
// Test Fixtures
// ============================================================================

// Fields drop in order; the runtime goes last.
struct MockApi {
    server: MockServer,
    session_dir: TempDir,
    runtime: Runtime,
}

impl MockApi {
    fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());

        let session_dir = TempDir::new().unwrap();
        fs::write(
            session_dir.path().join("session.json"),
            r#"{"sessionid": "abc", "csrftoken": "tok"}"#,
        )
        .unwrap();

        Self {
            server,
            session_dir,
            runtime,
        }
    }

    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn client(&self) -> InstagramClient {
        let mut client = InstagramClient::new(InstagramClientConfig {
            api_base: self.server.uri(),
            timeout: Duration::from_secs(5),
            page_size: 2,
            session_file: self.session_dir.path().join("session.json"),
        })
        .unwrap();
        client.authenticate("me").unwrap();
        client
    }

    fn request_count(&self) -> usize {
        self.runtime
            .block_on(self.server.received_requests())
            .map_or(0, |requests| requests.len())
    }
}

fn profile() -> Profile {
    Profile {
        id: "1234".to_string(),
        username: "target".to_string(),
        full_name: None,
        follower_count: None,
        following_count: None,
        is_private: false,
    }
}

fn page(users: &[&str], next_max_id: Value) -> ResponseTemplate {
    let users: Vec<_> = users.iter().map(|u| json!({ "username": u })).collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "users": users,
        "next_max_id": next_max_id,
        "status": "ok"
    }))
}

fn first_page() -> MockBuilder {
    Mock::given(method("GET"))
        .and(path(FOLLOWERS_PATH))
        .and(query_param_is_missing("max_id"))
}

fn page_after(cursor: &str) -> MockBuilder {
    Mock::given(method("GET"))
        .and(path(FOLLOWERS_PATH))
        .and(query_param("max_id", cursor))
}

fn fetch_followers(client: &InstagramClient) -> FetchOutcome {
    let target = profile();
    FetchOutcome::collect(Category::Followers, client.followers(&target))
}

// ============================================================================
// Pagination
// ============================================================================

mod pagination {
    use super::*;

    #[test]
    fn follows_cursor_across_pages() {
        let api = MockApi::start();
        api.mount(
            first_page()
                .and(query_param("count", "2"))
                .and(header("X-CSRFToken", "tok"))
                .respond_with(page(&["b", "a"], json!(2))),
        );
        api.mount(page_after("2").respond_with(page(&["c"], Value::Null)));

        let outcome = fetch_followers(&api.client());

        assert_eq!(outcome.into_set().to_sorted_vec(), vec!["a", "b", "c"]);
        assert_eq!(api.request_count(), 2);
    }

    #[test]
    fn empty_page_ends_listing() {
        let api = MockApi::start();
        api.mount(first_page().respond_with(page(&[], json!("more"))));
        api.mount(page_after("more").respond_with(page(&["never"], Value::Null)));

        let outcome = fetch_followers(&api.client());

        assert_eq!(outcome, FetchOutcome::Fetched(Default::default()));
        assert_eq!(api.request_count(), 1);
    }

    #[test]
    fn repeated_cursor_stops_listing() {
        let api = MockApi::start();
        api.mount(first_page().respond_with(page(&["a"], json!("c1"))));
        api.mount(page_after("c1").respond_with(page(&["b"], json!("c1"))));

        let outcome = fetch_followers(&api.client());

        assert_eq!(outcome.into_set().to_sorted_vec(), vec!["a", "b"]);
        assert_eq!(api.request_count(), 2);
    }

    #[test]
    fn failure_on_later_page_fails_category() {
        let api = MockApi::start();
        api.mount(first_page().respond_with(page(&["a", "b"], json!("c1"))));
        api.mount(page_after("c1").respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "oops" })),
        ));

        let client = api.client();
        let target = profile();
        let items: Vec<_> = client.followers(&target).collect();

        assert_eq!(items.len(), 3);
        assert!(matches!(
            &items[2],
            Err(TrackerError::Fetch {
                source: FetchErrorKind::ApiError(detail),
                ..
            }) if detail.contains("500") && detail.contains("oops")
        ));

        let outcome = fetch_followers(&client);
        assert!(!outcome.is_fetched());
        assert!(outcome.into_set().is_empty());
    }

    #[test]
    fn unparseable_page_fails_category() {
        let api = MockApi::start();
        api.mount(first_page().respond_with(ResponseTemplate::new(200).set_body_string("<html>")));

        let client = api.client();
        let target = profile();
        let items: Vec<_> = client.followers(&target).collect();

        assert!(matches!(
            items.as_slice(),
            [Err(TrackerError::Fetch {
                source: FetchErrorKind::InvalidResponse(_),
                ..
            })]
        ));
    }
}

// ============================================================================
// Status Mapping
// ============================================================================

mod status_mapping {
    use super::*;

    fn listing_error(status: u16) -> TrackerError {
        let api = MockApi::start();
        api.mount(first_page().respond_with(ResponseTemplate::new(status)));

        let client = api.client();
        let target = profile();
        let mut items = client.followers(&target);
        let err = items.next().unwrap().unwrap_err();
        assert!(items.next().is_none());
        err
    }

    #[test]
    fn unauthorized_is_not_permitted() {
        assert!(matches!(
            listing_error(401),
            TrackerError::Fetch {
                category: Category::Followers,
                source: FetchErrorKind::NotPermitted(_),
                ..
            }
        ));
    }

    #[test]
    fn forbidden_is_not_permitted() {
        assert!(matches!(
            listing_error(403),
            TrackerError::Fetch {
                source: FetchErrorKind::NotPermitted(_),
                ..
            }
        ));
    }

    #[test]
    fn other_statuses_are_api_errors() {
        assert!(matches!(
            listing_error(429),
            TrackerError::Fetch {
                source: FetchErrorKind::ApiError(_),
                ..
            }
        ));
    }
}

// ============================================================================
// Profile Lookup
// ============================================================================

mod profile_lookup {
    use super::*;

    fn lookup() -> MockBuilder {
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .and(query_param("username", "target"))
    }

    #[test]
    fn resolves_profile() {
        let api = MockApi::start();
        api.mount(lookup().respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "user": {
                    "id": "1234",
                    "username": "target",
                    "full_name": "Target Person",
                    "edge_followed_by": { "count": 10 },
                    "edge_follow": { "count": 3 }
                }
            },
            "status": "ok"
        }))));

        let profile = api.client().lookup_profile("target").unwrap();

        assert_eq!(profile.id, "1234");
        assert_eq!(profile.full_name.as_deref(), Some("Target Person"));
        assert_eq!(profile.follower_count, Some(10));
        assert_eq!(profile.following_count, Some(3));
    }

    #[test]
    fn not_found_is_lookup_error() {
        let api = MockApi::start();
        api.mount(lookup().respond_with(ResponseTemplate::new(404)));

        let err = api.client().lookup_profile("target").unwrap_err();

        assert!(matches!(err, TrackerError::ProfileLookup { .. }));
        assert!(err.is_fatal_precondition());
    }

    #[test]
    fn null_user_is_lookup_error() {
        let api = MockApi::start();
        api.mount(
            lookup().respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "user": null } })),
            ),
        );

        let err = api.client().lookup_profile("target").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::ProfileLookup { ref reason, .. } if reason.contains("does not exist")
        ));
    }
}
