// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers, one module per resource.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub mod admin;
pub mod books;
pub mod clubs;
pub mod messages;
pub mod progress;
pub mod users;

/// Error payload returned on every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Builds a JSON error response with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

pub(crate) fn bad_request(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, message)
}

pub(crate) fn not_found(message: impl Into<String>) -> Response {
    error_response(StatusCode::NOT_FOUND, message)
}

/// Logs the underlying error and returns an opaque 500.
pub(crate) fn internal(err: impl std::fmt::Display) -> Response {
    tracing::error!(error = %err, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// GET /api/health
pub async fn health() -> Response {
    Json(serde_json::json!({
        "status": "ok",
        "service": "colloquy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}
