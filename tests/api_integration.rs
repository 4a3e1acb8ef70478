//! Integration tests against a stand-in backend.
//!
//! Each test starts a `wiremock` server, points an `AdminClient` at it and
//! drives either the sub-clients or the screens end to end.
//!
//! Run with:
//! ```bash
//! cargo test --test api_integration
//! ```

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use custody_admin::client::AdminClient;
use custody_admin::error::{HttpError, SdkError};
use custody_admin::session::{MemorySessionStore, SessionStore};
use custody_admin::shared::Username;
use custody_admin::view::{
    DashboardScreen, LoginScreen, Route, Router, SignupScreen, UserDetailScreen, ViewState,
};

fn client_for(server: &MockServer, store: Arc<MemorySessionStore>) -> AdminClient {
    AdminClient::builder()
        .base_url(&server.uri())
        .session_store(store)
        .build()
        .expect("client should build")
}

fn user_rows(n: usize, offset: usize) -> serde_json::Value {
    let rows: Vec<_> = (0..n)
        .map(|i| json!({ "username": format!("user{}", offset + i) }))
        .collect();
    json!(rows)
}

async fn mount_user(server: &MockServer, username: &str, auto_withdraw: bool) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{username}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": username,
            "auto_withdraw": auto_withdraw,
            "email": format!("{username}@example.com"),
        })))
        .mount(server)
        .await;
}

// ── Bearer credential ────────────────────────────────────────────────────────

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_rows(2, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("tok-123")));
    let page = client.users().list(1, 10).await.unwrap();
    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_rows(0, 0)))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::new()));
    client.users().list(1, 10).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

// ── Login / signup / logout ──────────────────────────────────────────────────

#[tokio::test]
async fn login_sends_form_and_persists_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=alice"))
        .and(body_string_contains("password=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_rows(1, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client_for(&server, store.clone());

    let mut screen = LoginScreen::new("alice", "s3cret");
    let outcome = screen.submit(&client).await;

    assert!(outcome.succeeded());
    assert_eq!(outcome.route, Route::Dashboard);
    assert_eq!(outcome.notice.title, "Login successful");
    assert_eq!(store.load().unwrap().as_deref(), Some("fresh-token"));

    // Later requests carry the new token.
    client.users().list(1, 10).await.unwrap();
}

#[tokio::test]
async fn login_failure_persists_nothing_and_shows_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Incorrect username or password" })),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client_for(&server, store.clone());

    let outcome = LoginScreen::new("alice", "wrong").submit(&client).await;

    assert!(!outcome.succeeded());
    assert_eq!(outcome.route, Route::Login);
    assert_eq!(outcome.notice.title, "Login failed");
    assert_eq!(outcome.notice.description, "Incorrect username or password");
    assert_eq!(store.load().unwrap(), None);
    assert!(!client.auth().is_authenticated().await);
}

#[tokio::test]
async fn login_failure_without_detail_uses_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::new()));
    let outcome = LoginScreen::new("alice", "pw").submit(&client).await;
    assert_eq!(
        outcome.notice.description,
        "Please check your credentials and try again."
    );
}

#[tokio::test]
async fn signup_routes_to_login_without_logging_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "pw",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "bob" })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client_for(&server, store.clone());

    let outcome = SignupScreen::new("bob", "bob@example.com", "pw")
        .submit(&client)
        .await;
    assert!(outcome.succeeded());
    assert_eq!(outcome.route, Route::Login);
    assert_eq!(
        outcome.notice.description,
        "Your account has been created. Please log in."
    );
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn signup_failure_shows_validation_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error" }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::new()));
    let outcome = SignupScreen::new("bob", "nope", "pw").submit(&client).await;
    assert_eq!(outcome.route, Route::Signup);
    assert_eq!(outcome.notice.description, "value is not a valid email address");
}

#[tokio::test]
async fn logout_clears_token_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::with_token("old-token"));
    let client = client_for(&server, store.clone());
    let mut router = Router::for_client(&client);
    assert_eq!(router.navigate(Route::Dashboard), &Route::Dashboard);

    let notice = router.logout(&client).await;

    assert!(notice.is_some_and(|n| n.is_failure()));
    assert_eq!(router.current(), &Route::Login);
    assert_eq!(store.load().unwrap(), None);
    assert!(!client.auth().is_authenticated().await);
    assert_eq!(router.navigate(Route::Dashboard), &Route::Login);
}

#[tokio::test]
async fn logout_accepts_empty_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::with_token("old-token"));
    let client = client_for(&server, store.clone());
    client.auth().logout().await.unwrap();
    assert_eq!(store.load().unwrap(), None);
}

// ── Dashboard pagination ─────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_pagination_follows_page_fullness() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_rows(10, 0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_rows(3, 10)))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let mut screen = DashboardScreen::default();

    screen.load(&client).await;
    assert_eq!(screen.state().ready().map(Vec::len), Some(10));
    assert!(screen.can_next());
    assert!(!screen.can_previous());

    assert!(screen.next(&client).await);
    assert_eq!(screen.page(), 2);
    let rows = screen.state().ready().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].username.as_str(), "user10");
    assert!(!screen.can_next());
    assert!(screen.can_previous());

    // Disabled "next" is a no-op.
    assert!(!screen.next(&client).await);
    assert_eq!(screen.page(), 2);

    assert!(screen.previous(&client).await);
    assert_eq!(screen.page(), 1);
    assert!(screen.can_next());
}

#[tokio::test]
async fn dashboard_error_disables_next() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Not authenticated" })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::new()));
    let mut screen = DashboardScreen::default();
    screen.load(&client).await;
    assert!(screen.state().error().is_some());
    assert!(!screen.can_next());
}

// ── User detail ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_detail_loads_all_sections() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", false).await;
    Mock::given(method("GET"))
        .and(path("/users/alice/charge_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "charge_history": [
                { "timestamp": "2024-03-01T10:00:00", "from": "ext", "to": "alice", "amount": 25.5 }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/withdraw_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "withdraw_history": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": 100.25 })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let mut screen = UserDetailScreen::new(Username::from("alice"));
    screen.load(&client).await;

    let detail = screen.state().ready().expect("detail loaded");
    assert!(!detail.auto_withdraw);
    assert_eq!(detail.extra["email"], "alice@example.com");
    assert_eq!(screen.charge_history().len(), 1);
    assert_eq!(screen.charge_history()[0].source, "ext");
    assert!(screen.withdraw_history().is_empty());
    assert_eq!(
        screen.balance().map(ToString::to_string).as_deref(),
        Some("100.25 USDT")
    );

    // Fetch order: detail, charge, withdraw, balance.
    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        paths,
        [
            "/users/alice",
            "/users/alice/charge_history",
            "/users/alice/withdraw_history",
            "/users/alice/balance",
        ]
    );
}

#[tokio::test]
async fn user_detail_secondary_failure_leaves_section_empty() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", true).await;
    Mock::given(method("GET"))
        .and(path("/users/alice/charge_history"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/withdraw_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "withdraw_history": [
                { "timestamp": 1709287200000i64, "from": "alice", "to": "bank", "amount": 10 }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/balance"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "no wallet" })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let mut screen = UserDetailScreen::new(Username::from("alice"));
    screen.load(&client).await;

    assert!(matches!(screen.state(), ViewState::Ready(_)));
    assert!(screen.charge_history().is_empty());
    assert_eq!(screen.withdraw_history().len(), 1);
    assert!(screen.balance().is_none());
}

#[tokio::test]
async fn user_detail_reload_drops_sections_that_now_fail() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", false).await;
    Mock::given(method("GET"))
        .and(path("/users/alice/charge_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "charge_history": [
                { "timestamp": "2024-03-01T10:00:00Z", "from": "ext", "to": "alice", "amount": 5 }
            ]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/charge_history"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/withdraw_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "withdraw_history": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": 5 })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/balance"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let mut screen = UserDetailScreen::new(Username::from("alice"));

    screen.load(&client).await;
    assert_eq!(screen.charge_history().len(), 1);
    assert!(screen.balance().is_some());

    screen.load(&client).await;
    assert!(matches!(screen.state(), ViewState::Ready(_)));
    assert!(screen.charge_history().is_empty());
    assert!(screen.balance().is_none());
}

#[tokio::test]
async fn user_detail_primary_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "User not found" })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let mut screen = UserDetailScreen::new(Username::from("ghost"));
    screen.load(&client).await;

    assert!(screen.state().error().is_some());
    // Secondary sections are not fetched after a primary failure.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

// ── Auto-withdraw toggle + cache ─────────────────────────────────────────────

#[tokio::test]
async fn toggle_updates_local_state_after_success() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", false).await;
    Mock::given(method("PATCH"))
        .and(path("/user/alice/auto_withdraw"))
        .and(body_json(json!({ "auto_withdraw": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "auto_withdraw": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let mut screen = UserDetailScreen::new(Username::from("alice"));
    screen.load(&client).await;

    let notice = screen.toggle_auto_withdraw(&client).await.unwrap();
    assert_eq!(notice.title, "Auto withdraw updated");
    assert!(screen.state().ready().unwrap().auto_withdraw);
}

#[tokio::test]
async fn toggle_failure_leaves_state_unchanged() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", false).await;
    Mock::given(method("PATCH"))
        .and(path("/user/alice/auto_withdraw"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "detail": "Forbidden" })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let mut screen = UserDetailScreen::new(Username::from("alice"));
    screen.load(&client).await;

    let err = screen.toggle_auto_withdraw(&client).await.unwrap_err();
    assert!(matches!(err, SdkError::Http(HttpError::Forbidden(_))));
    assert_eq!(err.detail().as_deref(), Some("Forbidden"));
    assert!(!screen.state().ready().unwrap().auto_withdraw);
}

#[tokio::test]
async fn set_auto_withdraw_invalidates_cached_user() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", false).await;
    Mock::given(method("PATCH"))
        .and(path("/user/alice/auto_withdraw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "auto_withdraw": true })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let users = client.users();
    let alice = Username::from("alice");

    users.get_cached(&alice).await.unwrap();
    users.get_cached(&alice).await.unwrap();
    assert!(users.is_cached(&alice).await);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    users.set_auto_withdraw(&alice, true).await.unwrap();
    assert!(!users.is_cached(&alice).await);

    users.get_cached(&alice).await.unwrap();
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn usernames_are_percent_encoded_in_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "a b" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let detail = client.users().get(&Username::from("a b")).await.unwrap();
    assert_eq!(detail.username.as_str(), "a b");
    assert!(!detail.auto_withdraw);
}

#[tokio::test]
async fn logout_clears_user_cache_even_when_server_fails() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", false).await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemorySessionStore::with_token("t")));
    let alice = Username::from("alice");
    client.users().get_cached(&alice).await.unwrap();
    assert!(client.users().is_cached(&alice).await);

    assert!(client.auth().logout().await.is_err());
    assert!(!client.users().is_cached(&alice).await);
}
