//! Standalone worker binary.
//!
//! Runs one consumer loop against the shared queue. Deploy as many of
//! these as throughput requires; `BLPOP` hands each job id to exactly one
//! instance.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redraft_llm::GoogleAiClient;
use redraft_store::{RedisJobQueue, RedisJobStore};
use redraft_worker::Worker;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redraft_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let redis_url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
    let google_ai_url = std::env::var("GOOGLE_AI_URL").expect("GOOGLE_AI_URL must be set");

    let conn = redraft_store::connect(&redis_url)
        .await
        .expect("Failed to connect to Redis");
    redraft_store::ping(&conn)
        .await
        .expect("Redis health check failed");
    tracing::info!("Connected to Redis");

    // The queue gets its own connection: BLPOP parks whichever connection
    // it runs on, and record reads/writes must not queue up behind it.
    let queue_conn = redraft_store::connect(&redis_url)
        .await
        .expect("Failed to open queue connection");

    let store = Arc::new(RedisJobStore::new(conn));
    let queue = Arc::new(RedisJobQueue::new(queue_conn));
    let llm = Arc::new(GoogleAiClient::new(google_ai_url));

    let cancel = CancellationToken::new();
    let worker = Worker::new(store, queue, llm);

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.cancel();
    });

    worker.run(cancel).await;

    tracing::info!("Worker shut down");
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM (on Unix) so the loop stops
/// cleanly whether interrupted interactively or by a process manager.
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
            tracing::info!("Received SIGINT (Ctrl-C), stopping worker");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping worker");
        }
    }
}
