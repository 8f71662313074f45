// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reader account routes.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use colloquy_storage::queries::users as store;

use crate::handlers::{bad_request, internal, not_found};
use crate::state::AppState;

/// Request body for POST /api/users.
#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    /// Display name shown to other club members.
    pub name: String,
}

/// Request body for PUT /api/users/{user_id}/name.
#[derive(Debug, Deserialize)]
pub struct RenameBody {
    /// New display name.
    pub name: String,
}

/// POST /api/users
///
/// Creates a reader account.
pub async fn post_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Response {
    let name = body.name.trim();
    if name.is_empty() {
        return bad_request("Name is required");
    }
    match store::create_user(&state.db, name).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => internal(e),
    }
}

/// GET /api/users/{user_id}
pub async fn get_user(State(state): State<AppState>, Path(user_id): Path<i64>) -> Response {
    match store::get_user(&state.db, user_id).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => not_found("User not found"),
        Err(e) => internal(e),
    }
}

/// PUT /api/users/{user_id}/name
///
/// Changes a reader's display name.
pub async fn put_user_name(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<RenameBody>,
) -> Response {
    let name = body.name.trim();
    if name.is_empty() {
        return bad_request("Name is required");
    }
    match store::rename_user(&state.db, user_id, name).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => not_found("User not found"),
        Err(e) => internal(e),
    }
}
