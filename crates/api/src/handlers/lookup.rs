//! Handler for the actor image lookup.

use actorstats_core::lookup::{LookupMiss, LookupRequest};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::{AppError, AppResult};
use crate::response::HtmlJson;
use crate::state::AppState;

/// Name echoed in the not-found message when the body carries no name.
pub const MISSING_NAME: &str = "null";

/// Parse a lookup body.
///
/// Empty bodies and anything that is not a JSON object are rejected. An
/// object without a usable `name` parses to a request with no name.
pub fn parse_request(body: &[u8]) -> AppResult<LookupRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("empty request body".into()));
    }
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid lookup body: {e}")))?;
    if !value.is_object() {
        return Err(AppError::BadRequest("lookup body must be a JSON object".into()));
    }
    serde_json::from_value(value)
        .map_err(|e| AppError::BadRequest(format!("invalid lookup body: {e}")))
}

/// POST /lookup
///
/// Body `{ "name": "<actor name>" }`. Responds 200 with the search count
/// and the newest image for that name, or 404 with a message.
pub async fn lookup_image(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<impl IntoResponse> {
    let body = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = parse_request(&body)?;

    // Nothing is stored under a missing name.
    let Some(name) = request.name else {
        tracing::info!(reason = "missing_name", "Image lookup missed");
        return Err(AppError::ImageNotFound {
            name: MISSING_NAME.to_string(),
        });
    };

    match state.lookup.lookup(&name).await {
        Ok(result) => {
            tracing::info!(
                actor = %name,
                search_count = result.search_count,
                "Image lookup succeeded",
            );
            Ok(HtmlJson(StatusCode::OK, result))
        }
        Err(miss) => {
            match &miss {
                LookupMiss::NoRecord => {
                    tracing::info!(actor = %name, reason = miss.reason(), "Image lookup missed");
                }
                _ => {
                    tracing::warn!(
                        actor = %name,
                        reason = miss.reason(),
                        error = %miss,
                        "Image lookup failed",
                    );
                }
            }
            Err(AppError::ImageNotFound { name })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_bodies_are_rejected() {
        assert!(matches!(parse_request(b""), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_request(b" \n\t"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        let bodies: [&[u8]; 5] = [b"not json", b"null", b"[]", b"\"Tom\"", br#"{"name": {}}"#];
        for body in bodies {
            assert!(
                matches!(parse_request(body), Err(AppError::BadRequest(_))),
                "body {:?} should be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn object_without_name_parses_to_no_name() {
        assert_eq!(parse_request(b"{}").unwrap().name, None);
        assert_eq!(parse_request(br#"{"name": null}"#).unwrap().name, None);
        assert_eq!(parse_request(br#"{"movie": "Big"}"#).unwrap().name, None);
    }

    #[test]
    fn numeric_name_is_kept_as_text() {
        let request = parse_request(br#"{"name": 42}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some("42"));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let request = parse_request(br#"{"name":"Tom Hanks","movie":"Big"}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some("Tom Hanks"));
    }
}
