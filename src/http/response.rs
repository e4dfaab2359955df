//! Response helpers for handlers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Plain-text response.
pub fn text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain")], body.into()).into_response()
}

pub fn ok_text(body: impl Into<String>) -> Response {
    text(StatusCode::OK, body)
}

/// JSON response. Falls back to a 500 when `value` cannot be serialized.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

pub fn ok_json<T: Serialize>(value: &T) -> Response {
    json(StatusCode::OK, value)
}

pub fn bad_request_json<T: Serialize>(value: &T) -> Response {
    json(StatusCode::BAD_REQUEST, value)
}

pub fn server_error_json<T: Serialize>(value: &T) -> Response {
    json(StatusCode::INTERNAL_SERVER_ERROR, value)
}

/// The response for any request the router cannot resolve.
pub fn not_found(method: &str, path: &str) -> Response {
    text(
        StatusCode::NOT_FOUND,
        format!("Not Found Method: {method} Path: {path}"),
    )
}
