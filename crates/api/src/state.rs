use actorstats_core::lookup::ImageLookup;
use actorstats_storage::StorageBackendKind;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool and the lookup share their internals).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: actorstats_db::DbPool,
    /// Lookup orchestrator wired to the request history and object store.
    pub lookup: ImageLookup,
    /// Backend the lookup reads images from.
    pub storage_backend: StorageBackendKind,
}
