use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redraft_api::config::ServerConfig;
use redraft_api::{routes, state};
use redraft_core::settings::JobSettings;
use redraft_jobs::JobManager;
use redraft_llm::GoogleAiClient;
use redraft_store::{RedisJobQueue, RedisJobStore};
use redraft_worker::Worker;

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redraft_api=debug,redraft_worker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let settings = JobSettings::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let redis_url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");

    let conn = redraft_store::connect(&redis_url)
        .await
        .expect("Failed to connect to Redis");
    redraft_store::ping(&conn)
        .await
        .expect("Redis health check failed");
    tracing::info!("Connected to Redis");

    // --- Job manager ---
    let store = Arc::new(RedisJobStore::new(conn.clone()));
    let queue = Arc::new(RedisJobQueue::new(conn.clone()));
    let manager = Arc::new(JobManager::new(store.clone(), queue, settings));

    // --- In-process worker ---
    // The worker's queue gets a dedicated connection: BLPOP parks the
    // connection it runs on, and request-path commands must not queue up
    // behind it.
    let google_ai_url = std::env::var("GOOGLE_AI_URL").expect("GOOGLE_AI_URL must be set");
    let worker_queue_conn = redraft_store::connect(&redis_url)
        .await
        .expect("Failed to open worker queue connection");

    let worker = Worker::new(
        store,
        Arc::new(RedisJobQueue::new(worker_queue_conn)),
        Arc::new(GoogleAiClient::new(google_ai_url)),
    );

    let worker_cancel = tokio_util::sync::CancellationToken::new();
    let worker_handle = tokio::spawn(worker.run(worker_cancel.clone()));
    tracing::info!("Worker started");

    // --- App state ---
    let state = AppState {
        manager,
        store_conn: Some(conn),
    };

    // --- Request ID header name ---
    let request_id_header = HeaderName::from_static("x-request-id");

    // --- Router ---
    let app = Router::new()
        // Health check at root level (not under /api/v1).
        .merge(routes::health::router())
        // API v1 routes.
        .nest("/api/v1", routes::api_routes())
        // -- Middleware stack (applied bottom-up) --
        // Panic recovery: catch panics and return 500 JSON.
        .layer(CatchPanicLayer::new())
        // Request timeout.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Propagate request ID to response.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Set request ID on incoming requests.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // Shared state.
        .with_state(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop the worker between iterations. An in-flight LLM call is
    // abandoned with the job left in `created`, the same outcome as a
    // processing failure.
    worker_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(10), worker_handle).await;
    tracing::info!("Worker stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
