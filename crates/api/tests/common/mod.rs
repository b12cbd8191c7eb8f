//! Shared harness for the HTTP integration tests.
//!
//! Builds the full application router with the same middleware stack as
//! `main.rs`, but over the in-memory store/queue adapters so the suite
//! needs no Redis and no external LLM.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use redraft_api::routes;
use redraft_api::state::AppState;
use redraft_core::settings::JobSettings;
use redraft_jobs::JobManager;
use redraft_store::memory::{MemoryJobQueue, MemoryJobStore};

/// The router plus handles into its backing adapters, so tests can drive
/// the worker-side of the lifecycle directly.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryJobStore>,
    pub queue: Arc<MemoryJobQueue>,
    pub manager: Arc<JobManager>,
}

/// Build the application over fresh in-memory adapters.
///
/// Mirrors the router construction in `main.rs` so the tests exercise the
/// same middleware stack (request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app() -> TestApp {
    let store = Arc::new(MemoryJobStore::new());
    let queue = Arc::new(MemoryJobQueue::new());
    let manager = Arc::new(JobManager::new(
        store.clone(),
        queue.clone(),
        JobSettings::default(),
    ));

    let state = AppState {
        manager: manager.clone(),
        store_conn: None,
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
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
        store,
        queue,
        manager,
    }
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
