// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Club creation, joining, and roster routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use colloquy_storage::queries::clubs::{self as store, JoinOutcome};

use crate::handlers::{bad_request, error_response, internal, not_found};
use crate::state::AppState;

/// Request body for POST /api/clubs.
#[derive(Debug, Deserialize)]
pub struct CreateClubBody {
    /// Club display name.
    pub name: String,
    /// Catalog id of the book the club reads.
    pub book_id: i64,
    /// Reader creating the club; becomes its owner.
    pub user_id: i64,
}

/// Request body for POST /api/clubs/join.
#[derive(Debug, Deserialize)]
pub struct JoinBody {
    /// Six-character invite code, case-insensitive.
    pub invite_code: String,
    /// Reader joining the club.
    pub user_id: i64,
}

/// Query string carrying the acting reader's id.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// POST /api/clubs
///
/// Creates a club and enrolls the creator as owner.
pub async fn post_club(
    State(state): State<AppState>,
    Json(body): Json<CreateClubBody>,
) -> Response {
    if body.name.trim().is_empty() {
        return bad_request("Missing required fields: name, book_id, user_id");
    }
    match store::create_club(&state.db, body.name.trim(), body.book_id, body.user_id).await {
        Ok(club) => (StatusCode::CREATED, Json(club)).into_response(),
        Err(e) => internal(e),
    }
}

/// GET /api/clubs?user_id={id}
///
/// Lists the clubs the reader belongs to, newest first.
pub async fn get_clubs(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Response {
    let Some(user_id) = query.user_id else {
        return bad_request("Missing user_id parameter");
    };
    match store::list_clubs_for_user(&state.db, user_id).await {
        Ok(clubs) => Json(clubs).into_response(),
        Err(e) => internal(e),
    }
}

/// POST /api/clubs/join
///
/// Joins a club by invite code.
pub async fn post_join(State(state): State<AppState>, Json(body): Json<JoinBody>) -> Response {
    if body.invite_code.trim().is_empty() {
        return bad_request("Missing required fields: invite_code, user_id");
    }
    match store::join_by_invite_code(&state.db, &body.invite_code, body.user_id).await {
        Ok(JoinOutcome::Joined(club)) => Json(club).into_response(),
        Ok(JoinOutcome::AlreadyMember(_)) => {
            bad_request("You are already a member of this club")
        }
        Ok(JoinOutcome::Full) => bad_request("This club is full (max 5 members for MVP)"),
        Ok(JoinOutcome::InvalidCode) => not_found("Invalid invite code"),
        Err(e) => internal(e),
    }
}

/// GET /api/clubs/{club_id}?user_id={id}
///
/// Club details with book fields. Membership is checked before existence,
/// so outsiders cannot probe which club ids exist.
pub async fn get_club(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Query(query): Query<UserIdQuery>,
) -> Response {
    let Some(user_id) = query.user_id else {
        return bad_request("Missing user_id parameter");
    };
    match store::is_member(&state.db, &club_id, user_id).await {
        Ok(true) => {}
        Ok(false) => return error_response(StatusCode::FORBIDDEN, "Not a member of this club"),
        Err(e) => return internal(e),
    }
    match store::get_club(&state.db, &club_id).await {
        Ok(Some(club)) => Json(club).into_response(),
        Ok(None) => not_found("Club not found"),
        Err(e) => internal(e),
    }
}

/// GET /api/clubs/{club_id}/members
///
/// Roster in join order.
pub async fn get_club_members(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Response {
    match store::list_members(&state.db, &club_id).await {
        Ok(members) => Json(members).into_response(),
        Err(e) => internal(e),
    }
}
