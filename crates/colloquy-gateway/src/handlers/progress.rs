// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading progress routes.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use colloquy_storage::queries::progress as store;

use crate::handlers::{bad_request, internal};
use crate::state::AppState;

/// Request body for POST /api/reading-progress/club/{club_id}.
#[derive(Debug, Deserialize)]
pub struct ProgressBody {
    /// Reader reporting their position.
    pub user_id: i64,
    /// Percent of the book read, 0 to 100.
    pub position: i64,
    /// Optional free-text marker ("Chapter 7").
    #[serde(default)]
    pub label: Option<String>,
}

/// GET /api/reading-progress/club/{club_id}
///
/// Every reported position in the club, furthest reader first.
pub async fn get_club_progress(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Response {
    match store::progress_for_club(&state.db, &club_id).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => internal(e),
    }
}

/// GET /api/reading-progress/club/{club_id}/user/{user_id}
///
/// One reader's position. Readers who have not reported yet read as
/// position zero rather than a 404, so clients need no special case.
pub async fn get_member_progress(
    State(state): State<AppState>,
    Path((club_id, user_id)): Path<(String, i64)>,
) -> Response {
    match store::progress_for_user(&state.db, &club_id, user_id).await {
        Ok(Some(progress)) => Json(progress).into_response(),
        Ok(None) => Json(serde_json::json!({ "position": 0, "label": null })).into_response(),
        Err(e) => internal(e),
    }
}

/// POST /api/reading-progress/club/{club_id}
///
/// Records a reader's position, replacing any earlier report.
pub async fn post_progress(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Json(body): Json<ProgressBody>,
) -> Response {
    if !(0..=100).contains(&body.position) {
        return bad_request("position must be between 0 and 100");
    }
    let position = body.position as u8;
    match store::upsert_progress(&state.db, &club_id, body.user_id, position, body.label.as_deref())
        .await
    {
        Ok(progress) => Json(progress).into_response(),
        Err(e) => internal(e),
    }
}
