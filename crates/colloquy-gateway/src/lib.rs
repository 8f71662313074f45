// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST gateway for the Colloquy book-club service.
//!
//! Exposes readers, the book catalog, clubs, conversation logs, reading
//! progress, and the operator usage report over JSON, and fronts the
//! author-reply pipeline. All handlers share one [`AppState`].

pub mod handlers;
pub mod server;
pub mod state;

pub use server::{router, serve};
pub use state::AppState;
