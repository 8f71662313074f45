// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembles the bounded conversation context for an author-persona reply.
//!
//! One [`ContextAssembler::assemble`] call reads the club's metadata, roster,
//! reading progress, and recent message window, and produces the system
//! directive plus the chronological turn list to submit to the provider. It
//! is a pure read of stored state: no caching, no writes.

use colloquy_config::model::ContextConfig;
use colloquy_core::{ColloquyError, MessageWithSender, Sender, Turn, TurnRole};
use colloquy_storage::Database;
use colloquy_storage::queries::{clubs, messages, progress};
use tracing::{debug, warn};

use crate::directive;

/// Speaker tag used when a human sender has no usable display name.
const ANONYMOUS_SPEAKER: &str = "A reader";

/// The assembled input for one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    /// Composed system directive: framing, persona, spoiler guard.
    pub system_directive: String,
    /// Conversation window in chronological order.
    pub turns: Vec<Turn>,
    /// Display name the reply is attributed to, the book's author.
    pub persona_name: String,
}

/// Builds completion context from stored club state.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    db: Database,
    history_limit: u32,
}

impl ContextAssembler {
    /// Creates an assembler over the given database.
    pub fn new(db: Database, config: &ContextConfig) -> Self {
        Self {
            db,
            history_limit: config.history_limit,
        }
    }

    /// Assembles the system directive and conversation window for a club.
    ///
    /// Fails with [`ColloquyError::ClubNotFound`] before any other read when
    /// the club does not exist. A failed progress read weakens the spoiler
    /// guard to "no guard" instead of aborting the reply.
    pub async fn assemble(&self, club_id: &str) -> Result<AssembledContext, ColloquyError> {
        let overview = clubs::get_club_overview(&self.db, club_id)
            .await?
            .ok_or_else(|| ColloquyError::ClubNotFound {
                club_id: club_id.to_string(),
            })?;

        let (roster, progress_rows, history) = tokio::join!(
            clubs::roster_names(&self.db, club_id),
            progress::progress_for_club(&self.db, club_id),
            messages::recent_messages(&self.db, club_id, self.history_limit),
        );
        let roster = roster?;
        let history = history?;
        let progress_rows = match progress_rows {
            Ok(rows) => rows,
            Err(e) => {
                warn!(club_id, error = %e, "progress read failed, omitting spoiler guard");
                Vec::new()
            }
        };

        let system_directive = directive::compose_directive(&overview, &roster, &progress_rows);
        let turns = build_turns(&history);

        debug!(
            club_id,
            turns = turns.len(),
            members = roster.len(),
            guarded = !progress_rows.is_empty(),
            "context assembled"
        );

        Ok(AssembledContext {
            system_directive,
            turns,
            persona_name: overview.book_author,
        })
    }
}

/// Converts a newest-first message window into chronological turns.
fn build_turns(history: &[MessageWithSender]) -> Vec<Turn> {
    history.iter().rev().map(turn_from_message).collect()
}

/// Agent messages become assistant turns verbatim; human messages become
/// user turns tagged with the bracketed speaker name.
fn turn_from_message(row: &MessageWithSender) -> Turn {
    match row.message.sender {
        Sender::Agent { .. } => Turn {
            role: TurnRole::Assistant,
            content: row.message.body.clone(),
        },
        Sender::Human { .. } => {
            let name = row
                .sender_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(ANONYMOUS_SPEAKER);
            Turn {
                role: TurnRole::User,
                content: format!("[{name}]: {}", row.message.body),
            }
        }
    }
}
