// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state for axum request handlers.

use colloquy_agent::ReplyEngine;
use colloquy_cost::UsageLedger;
use colloquy_storage::Database;

/// Everything a request handler can reach: the store, the usage ledger,
/// and the reply engine. Cheap to clone; all members share the same
/// underlying connection.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub ledger: UsageLedger,
    pub engine: ReplyEngine,
}

impl AppState {
    pub fn new(db: Database, ledger: UsageLedger, engine: ReplyEngine) -> Self {
        Self { db, ledger, engine }
    }
}
