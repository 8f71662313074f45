// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST API server built on axum.
//!
//! Sets up routes, middleware, and shared state, and runs the listener
//! until the shutdown future resolves.

use std::future::Future;

use axum::Router;
use axum::routing::{delete, get, post, put};
use colloquy_core::ColloquyError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, admin, books, clubs, messages, progress, users};
use crate::state::AppState;

/// Builds the full route table under `/api`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/users", post(users::post_user))
        .route("/users/{user_id}", get(users::get_user))
        .route("/users/{user_id}/name", put(users::put_user_name))
        .route("/books", get(books::get_books))
        .route("/books/{book_id}", get(books::get_book))
        .route("/clubs", post(clubs::post_club).get(clubs::get_clubs))
        .route("/clubs/join", post(clubs::post_join))
        .route("/clubs/{club_id}", get(clubs::get_club))
        .route("/clubs/{club_id}/members", get(clubs::get_club_members))
        .route(
            "/messages/club/{club_id}",
            get(messages::get_club_messages).post(messages::post_club_message),
        )
        .route(
            "/messages/club/{club_id}/since/{last_id}",
            get(messages::get_club_messages_since),
        )
        .route(
            "/messages/club/{club_id}/author-reply",
            post(messages::post_author_reply),
        )
        .route("/messages/{message_id}", delete(messages::delete_message))
        .route(
            "/reading-progress/club/{club_id}",
            get(progress::get_club_progress).post(progress::post_progress),
        )
        .route(
            "/reading-progress/club/{club_id}/user/{user_id}",
            get(progress::get_member_progress),
        )
        .route("/admin/usage", get(admin::get_usage));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve(
    host: &str,
    port: u16,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ColloquyError> {
    let app = router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ColloquyError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ColloquyError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
