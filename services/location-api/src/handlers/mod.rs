//! HTTP request handlers for the location API.

pub mod health;
pub mod interval;
pub mod location;
pub mod stacks;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use location_protocol::{FailureResponse, LocationError};
use serde::Serialize;

/// Serialize `body` as a JSON response with `status`.
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => (status, [(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Failure body with the status code of `err`.
pub(crate) fn failure_response(err: &LocationError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, &err.to_failure())
}

pub(crate) fn internal_error(message: &str) -> Response {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &FailureResponse::new(message),
    )
}
