#![allow(dead_code)]

use std::sync::Arc;

use actorstats_core::lookup::ImageLookup;
use actorstats_db::PgRequestHistory;
use actorstats_storage::{InMemoryBlobStore, StorageBackendKind};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use actorstats_api::config::ServerConfig;
use actorstats_api::router::build_app_router;
use actorstats_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
    }
}

/// Build the full application router over the given pool and blob store.
///
/// Goes through `build_app_router` so tests exercise the production
/// middleware stack.
pub fn build_test_app(pool: PgPool, blobs: Arc<InMemoryBlobStore>) -> Router {
    let history = Arc::new(PgRequestHistory::new(pool.clone()));
    let state = AppState {
        pool,
        lookup: ImageLookup::new(history, blobs),
        storage_backend: StorageBackendKind::Local,
    };
    build_app_router(state, &test_config())
}

/// Build the router with an empty blob store.
pub fn build_app_without_blobs(pool: PgPool) -> Router {
    build_test_app(pool, Arc::new(InMemoryBlobStore::new()))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let text = body_text(response).await;
    serde_json::from_str(&text).unwrap()
}
