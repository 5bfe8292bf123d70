#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Tests run against the REAL router and state over a live PostgreSQL
//! database named by DATABASE_URL. When DATABASE_URL is not set the suite
//! skips itself rather than failing.
//!
//! A single [`TestApp`] is shared across all tests and initialized on a
//! long-lived multi-threaded Tokio runtime, so pool connections opened
//! during initialization stay valid for every test.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum::routing::post;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_sessions::Session;
use tower_sessions::cookie::SameSite;
use uuid::Uuid;

use dharohar_server::routes::auth::SESSION_USER_ID;
use dharohar_server::{AppState, Config, routes, session};

/// Shared Tokio runtime that outlives all individual test runtimes.
///
/// All tests run on this runtime via [`run_test`] so that pool connections
/// are never first created on a runtime that later shuts down.
pub static SHARED_RT: std::sync::LazyLock<tokio::runtime::Runtime> =
    std::sync::LazyLock::new(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("Failed to build shared test runtime")
    });

/// Global shared test app — initialized once, reused by every test.
/// None when DATABASE_URL is not configured.
static SHARED_APP: std::sync::OnceLock<Option<TestApp>> = std::sync::OnceLock::new();

/// Get the shared [`TestApp`], or None when no database is configured.
pub async fn shared_app() -> Option<&'static TestApp> {
    SHARED_APP
        .get_or_init(|| {
            // Initialize inside a separate OS thread on the shared
            // runtime's handle (avoiding nested block_on).
            let handle = SHARED_RT.handle().clone();
            std::thread::spawn(move || handle.block_on(TestApp::try_new()))
                .join()
                .expect("TestApp init thread panicked")
        })
        .as_ref()
}

/// Run an async test body on [`SHARED_RT`].
pub fn run_test<F: std::future::Future<Output = ()> + Send>(f: F) {
    SHARED_RT.block_on(f);
}

/// Test application wrapper over the real routers and state.
pub struct TestApp {
    router: Router,
    pub db: PgPool,
    pub state: AppState,
}

/// Test-only login endpoint: writes the given user id into the session the
/// way the real callback handler does.
async fn test_login(session: Session, Path(id): Path<String>) -> StatusCode {
    if session.insert(SESSION_USER_ID, &id).await.is_err() {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    StatusCode::NO_CONTENT
}

impl TestApp {
    /// Create the test application, or None when DATABASE_URL is unset.
    pub async fn try_new() -> Option<Self> {
        dotenvy::dotenv().ok();

        if std::env::var("DATABASE_URL").is_err() {
            eprintln!("DATABASE_URL not set, skipping integration tests");
            return None;
        }

        let config = Config::from_env().expect("Failed to load config");

        let state = AppState::new(&config)
            .await
            .expect("Failed to initialize AppState");

        let db = state.db().clone();

        let (session_layer, _store) =
            session::create_session_layer(db.clone(), SameSite::Lax)
                .await
                .expect("Failed to create session layer");

        // The real routers, plus a test-only session login route. The rate
        // limit layer is omitted so large suites never trip a shared
        // bucket.
        let router = routes::api_router()
            .route("/test/login/{id}", post(test_login))
            .layer(session_layer)
            .with_state(state.clone());

        Some(Self { router, db, state })
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send a request with cookies from a previous response.
    pub async fn request_with_cookies(
        &self,
        mut request: Request<Body>,
        cookies: &str,
    ) -> Response {
        if !cookies.is_empty() {
            request.headers_mut().insert(
                header::COOKIE,
                cookies.parse().expect("Invalid cookie header"),
            );
        }
        self.request(request).await
    }

    /// Create a user row directly and return its id.
    pub async fn create_test_user(&self, role: &str) -> String {
        let id = format!("test-{}", Uuid::now_v7().simple());

        sqlx::query(
            "INSERT INTO users (id, email, role) VALUES ($1, $2, $3)",
        )
        .bind(&id)
        .bind(format!("{id}@example.org"))
        .bind(role)
        .execute(&self.db)
        .await
        .expect("Failed to create test user");

        id
    }

    /// Create a user with the given role and return session cookies for it.
    pub async fn login_with_role(&self, role: &str) -> (String, String) {
        let id = self.create_test_user(role).await;
        let cookies = self.login_as(&id).await;
        (id, cookies)
    }

    /// Establish a session for an existing user id and return its cookies.
    pub async fn login_as(&self, user_id: &str) -> String {
        let response = self
            .request(
                Request::post(format!("/test/login/{user_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(
            response.status(),
            StatusCode::NO_CONTENT,
            "test login failed for '{user_id}'"
        );

        extract_cookies(&response)
    }
}

/// Extract Set-Cookie headers from a response for use in later requests.
pub fn extract_cookies(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Body is not valid JSON")
}

/// A unique marker string for isolating test data in a shared database.
pub fn unique_marker() -> String {
    format!("zq{}", Uuid::now_v7().simple())
}

/// Build a JSON request.
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}
