use std::sync::Arc;

use redraft_jobs::JobManager;
use redraft_store::StoreConn;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable: the manager is behind `Arc` and the store handle is
/// itself a clonable connection manager.
#[derive(Clone)]
pub struct AppState {
    /// Job creation and read-access orchestration.
    pub manager: Arc<JobManager>,
    /// Store connection used by the health check. `None` when running
    /// over the in-memory adapters (tests), where the store is trivially
    /// healthy.
    pub store_conn: Option<StoreConn>,
}
