//! Liveness report for load balancers and operators.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// `GET /health` body.
///
/// `status` is `"degraded"` while the database is unreachable; lookups
/// would then answer 404 for every name.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `"s3"` or `"local"`.
    pub storage_backend: &'static str,
}

impl ServiceHealth {
    pub fn new(db_healthy: bool, storage_backend: &'static str) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            storage_backend,
        }
    }
}

async fn report(State(state): State<AppState>) -> Json<ServiceHealth> {
    let db_healthy = match actorstats_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(ServiceHealth::new(db_healthy, state.storage_backend.name()))
}

/// Root-level route; not nested under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
