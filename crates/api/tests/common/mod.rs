#![allow(dead_code)] // Not every integration test binary uses every helper.

pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use tickbox_api::auth::email_token::TokenConfig;
use tickbox_api::auth::password::hash_password;
use tickbox_api::config::ServerConfig;
use tickbox_api::routes;
use tickbox_api::state::AppState;
use tickbox_core::store::UserStore;
use tickbox_core::user::NewUser;

use memory::{
    InMemoryAccess, InMemorySessions, InMemoryTodos, InMemoryUsers, RecordingMailer, StaticHealth,
};

/// Signing secret shared by every test app.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Fully wired application plus handles to the fixtures behind it.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUsers>,
    pub sessions: Arc<InMemorySessions>,
    pub todos: Arc<InMemoryTodos>,
    pub mailer: Arc<RecordingMailer>,
    pub config: Arc<ServerConfig>,
}

/// Build a test `ServerConfig` with safe defaults.
///
/// The rate-limit interval is zero so ordinary tests are never throttled;
/// rate-limit tests pass their own config via
/// [`build_test_app_with_config`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_base_url: "http://localhost:8000".to_string(),
        request_timeout_secs: 30,
        session_secret: TEST_SECRET.to_string(),
        rate_limit_interval_secs: 0,
        token: TokenConfig {
            secret: TEST_SECRET.to_string(),
            expiry_hours: 24,
        },
    }
}

/// Build the application over in-memory fixtures with the default config.
pub fn build_test_app() -> TestApp {
    build_test_app_with_config(test_config())
}

/// Build the application with a health probe that reports the storage as
/// unreachable.
pub fn build_degraded_test_app() -> TestApp {
    build_app_inner(test_config(), false)
}

/// Build the full application router with all middleware layers over
/// in-memory fixtures.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app_with_config(config: ServerConfig) -> TestApp {
    build_app_inner(config, true)
}

fn build_app_inner(config: ServerConfig, healthy: bool) -> TestApp {
    let users = Arc::new(InMemoryUsers::default());
    let sessions = Arc::new(InMemorySessions::default());
    let access = Arc::new(InMemoryAccess::default());
    let todos = Arc::new(InMemoryTodos::default());
    let mailer = Arc::new(RecordingMailer::default());
    let config = Arc::new(config);

    let state = AppState {
        users: users.clone(),
        sessions: sessions.clone(),
        access,
        todos: todos.clone(),
        mailer: mailer.clone(),
        health: Arc::new(StaticHealth(healthy)),
        config: config.clone(),
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::app_routes(state.clone()))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state);

    TestApp {
        router,
        users,
        sessions,
        todos,
        mailer,
        config,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// POST a JSON body to the app.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body with a session cookie attached.
pub async fn post_json_with_cookie(
    app: Router,
    path: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST with no body (logout-style routes) and a session cookie attached.
pub async fn post_with_cookie(app: Router, path: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET a path with no cookie.
pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET a path with a session cookie attached.
pub async fn get_with_cookie(app: Router, path: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Deserialize a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Extract the `sid` cookie pair from a response's `Set-Cookie` header,
/// ready to send back in a `Cookie` header.
pub fn session_cookie(response: &Response) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?.trim();
    pair.starts_with("sid=").then(|| pair.to_string())
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the fixture store and mark the email verified.
///
/// The email is `{username}@test.com`. Returns the plaintext password for
/// logging in.
pub async fn seed_verified_user(app: &TestApp, username: &str) -> String {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    app.users
        .create(&NewUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            display_name: username.to_string(),
            password_hash: hashed,
        })
        .await
        .expect("user creation should succeed");
    app.users
        .mark_verified(&format!("{username}@test.com"))
        .await
        .expect("verification flag should update");
    password.to_string()
}

/// Log in through the API and return the session cookie pair.
pub async fn login_user(app: &TestApp, login_id: &str, password: &str) -> String {
    let body = serde_json::json!({ "loginId": login_id, "password": password });
    let response = post_json(app.router.clone(), "/login", body).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));
    session_cookie(&response).expect("login must set the session cookie")
}

/// Wait for the background delivery task to record at least one mail.
///
/// Registration hands the mail off to a spawned task, so the recording may
/// land shortly after the HTTP response. Bounded to one second.
pub async fn wait_for_mail(app: &TestApp) -> Vec<(String, String)> {
    for _ in 0..100 {
        let sent = app.mailer.sent();
        if !sent.is_empty() {
            return sent;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no verification mail was recorded within one second");
}
