use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::response::HtmlJson;

/// Body message for a missing or unreadable request.
pub const MSG_BAD_REQUEST: &str = "error processing your request";

/// Application-level error type for HTTP handlers.
///
/// Every variant is reported to the client as a 404 with a `{ "message" }`
/// body. The detail carried by a variant is only logged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body was empty or could not be read as a lookup request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No image could be produced for the requested name.
    #[error("image not found for name: {name}")]
    ImageNotFound { name: String },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The message placed in the response body.
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(_) => MSG_BAD_REQUEST.to_string(),
            AppError::ImageNotFound { .. } => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::BadRequest(detail) = &self {
            tracing::debug!(detail = %detail, "Rejected lookup request");
        }

        HtmlJson(StatusCode::NOT_FOUND, json!({ "message": self.message() })).into_response()
    }
}
