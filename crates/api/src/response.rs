//! Response body helper for the lookup endpoints.
//!
//! Lookup responses carry a pretty-printed JSON body but are labelled
//! `Content-Type: text/html`, which existing clients of this endpoint expect.

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Content type sent with every lookup response.
pub const LOOKUP_CONTENT_TYPE: &str = "text/html";

/// A status code plus a JSON-serializable body sent as `text/html`.
#[derive(Debug)]
pub struct HtmlJson<T: Serialize>(pub StatusCode, pub T);

impl<T: Serialize> IntoResponse for HtmlJson<T> {
    fn into_response(self) -> Response {
        let HtmlJson(status, body) = self;
        match serde_json::to_string_pretty(&body) {
            Ok(text) => (status, [(CONTENT_TYPE, LOOKUP_CONTENT_TYPE)], text).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response body");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
