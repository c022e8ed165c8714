pub mod health;
pub mod lookup;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /lookup      actor image lookup (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(lookup::router())
}
