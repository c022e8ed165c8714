use axum::routing::post;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// Lookup routes.
///
/// ```text
/// POST /lookup    -> lookup_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/lookup", post(lookup::lookup_image))
}
