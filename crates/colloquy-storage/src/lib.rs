// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Colloquy book-club service.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed CRUD operations for
//! readers, the book catalog, clubs, the conversation log, and reading
//! progress.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::{Database, now_utc};
pub use models::*;
