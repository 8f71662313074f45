// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation log routes, including the author-reply pipeline entry point.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use colloquy_core::{ColloquyError, Sender};
use colloquy_storage::queries::{clubs, messages as store};

use crate::handlers::{bad_request, error_response, internal, not_found};
use crate::state::AppState;

/// Request body for POST /api/messages/club/{club_id}.
#[derive(Debug, Deserialize)]
pub struct PostMessageBody {
    /// Message text.
    pub body: String,
    /// Who is speaking, a reader or a persona.
    pub sender: Sender,
}

/// GET /api/messages/club/{club_id}
///
/// Full log in chronological order.
pub async fn get_club_messages(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Response {
    match store::list_messages(&state.db, &club_id, None).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => internal(e),
    }
}

/// GET /api/messages/club/{club_id}/since/{last_id}
///
/// Rows newer than the polling cursor, chronological.
pub async fn get_club_messages_since(
    State(state): State<AppState>,
    Path((club_id, last_id)): Path<(String, i64)>,
) -> Response {
    match store::list_messages(&state.db, &club_id, Some(last_id)).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => internal(e),
    }
}

/// POST /api/messages/club/{club_id}
///
/// Appends a message to the club's log.
pub async fn post_club_message(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Json(body): Json<PostMessageBody>,
) -> Response {
    if body.body.trim().is_empty() {
        return bad_request("Message body is required");
    }
    match clubs::get_club(&state.db, &club_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Club not found"),
        Err(e) => return internal(e),
    }
    match store::insert_message(&state.db, &club_id, &body.sender, &body.body, None).await {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(e) => internal(e),
    }
}

/// POST /api/messages/club/{club_id}/author-reply
///
/// Runs the reply pipeline and returns the persisted author message.
pub async fn post_author_reply(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Response {
    match state.engine.generate_reply(&club_id).await {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(ColloquyError::ClubNotFound { .. }) => not_found("Club not found"),
        Err(e) if e.is_provider_failure() => {
            tracing::error!(club_id = %club_id, error = %e, "author reply failed");
            error_response(StatusCode::BAD_GATEWAY, "Failed to generate author reply")
        }
        Err(e) => internal(e),
    }
}

/// DELETE /api/messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Response {
    match store::delete_message(&state.db, message_id).await {
        Ok(true) => Json(serde_json::json!({
            "success": true,
            "message": "Message deleted",
        }))
        .into_response(),
        Ok(false) => not_found("Message not found"),
        Err(e) => internal(e),
    }
}
