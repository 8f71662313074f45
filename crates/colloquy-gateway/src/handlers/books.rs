// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Book catalog routes. Read-only; the catalog is seeded by migration.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use colloquy_storage::queries::books as store;

use crate::handlers::{internal, not_found};
use crate::state::AppState;

/// GET /api/books
pub async fn get_books(State(state): State<AppState>) -> Response {
    match store::list_books(&state.db).await {
        Ok(books) => Json(books).into_response(),
        Err(e) => internal(e),
    }
}

/// GET /api/books/{book_id}
pub async fn get_book(State(state): State<AppState>, Path(book_id): Path<i64>) -> Response {
    match store::get_book(&state.db, book_id).await {
        Ok(Some(book)) => Json(book).into_response(),
        Ok(None) => not_found("Book not found"),
        Err(e) => internal(e),
    }
}
