// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation log operations.
//!
//! The log is append-only. Row ids double as the polling cursor, so every
//! read orders by `id`, not by timestamp.

use colloquy_core::ColloquyError;
use rusqlite::params;

use crate::database::{Database, now_utc};
use crate::models::{Message, MessageMetadata, MessageWithSender, Sender};

fn message_from_row(row: &rusqlite::Row<'_>) -> Result<MessageWithSender, rusqlite::Error> {
    let kind: String = row.get(2)?;
    let sender = match kind.as_str() {
        "human" => Sender::Human {
            user_id: row.get(3)?,
        },
        "agent" => Sender::Agent {
            persona_name: row.get(4)?,
        },
        other => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                format!("unrecognized sender kind `{other}`").into(),
            ));
        }
    };
    let metadata: Option<String> = row.get(6)?;
    // Unknown or malformed metadata reads as None rather than failing the row.
    let metadata = metadata
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok());
    Ok(MessageWithSender {
        message: Message {
            id: row.get(0)?,
            club_id: row.get(1)?,
            sender,
            body: row.get(5)?,
            metadata,
            created_at: row.get(7)?,
        },
        sender_name: row.get(8)?,
    })
}

const MESSAGE_SELECT: &str = "SELECT m.id, m.club_id, m.sender_kind, m.sender_user_id,
        m.persona_name, m.body, m.metadata, m.created_at, u.name
 FROM messages m LEFT JOIN users u ON m.sender_user_id = u.id";

/// Append a message to a club's log and return the stored row with its
/// assigned id.
pub async fn insert_message(
    db: &Database,
    club_id: &str,
    sender: &Sender,
    body: &str,
    metadata: Option<&MessageMetadata>,
) -> Result<Message, ColloquyError> {
    let club_id = club_id.to_string();
    let sender = sender.clone();
    let body = body.to_string();
    let metadata = metadata.cloned();
    let metadata_json = metadata
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| ColloquyError::Internal(format!("serialize message metadata: {e}")))?;
    let created_at = now_utc();
    db.connection()
        .call(move |conn| {
            let kind = sender.kind().to_string();
            let user_id = sender.user_id();
            let persona = sender.persona_name().map(str::to_string);
            conn.execute(
                "INSERT INTO messages (club_id, sender_kind, sender_user_id, persona_name,
                                       body, metadata, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![club_id, kind, user_id, persona, body, metadata_json, created_at],
            )?;
            Ok(Message {
                id: conn.last_insert_rowid(),
                club_id,
                sender,
                body,
                metadata,
                created_at,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List a club's log in chronological order, optionally only rows newer than
/// the given cursor.
pub async fn list_messages(
    db: &Database,
    club_id: &str,
    since_id: Option<i64>,
) -> Result<Vec<MessageWithSender>, ColloquyError> {
    let club_id = club_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut messages = Vec::new();
            match since_id {
                Some(cursor) => {
                    let sql = format!(
                        "{MESSAGE_SELECT} WHERE m.club_id = ?1 AND m.id > ?2 ORDER BY m.id ASC"
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt.query_map(params![club_id, cursor], message_from_row)?;
                    for row in rows {
                        messages.push(row?);
                    }
                }
                None => {
                    let sql = format!("{MESSAGE_SELECT} WHERE m.club_id = ?1 ORDER BY m.id ASC");
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt.query_map(params![club_id], message_from_row)?;
                    for row in rows {
                        messages.push(row?);
                    }
                }
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The newest `limit` rows of a club's log, newest first. Callers wanting
/// chronological order reverse the result.
pub async fn recent_messages(
    db: &Database,
    club_id: &str,
    limit: u32,
) -> Result<Vec<MessageWithSender>, ColloquyError> {
    let club_id = club_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "{MESSAGE_SELECT} WHERE m.club_id = ?1 ORDER BY m.id DESC LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![club_id, limit], message_from_row)?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete one message. Returns whether a row was removed.
pub async fn delete_message(db: &Database, message_id: i64) -> Result<bool, ColloquyError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute("DELETE FROM messages WHERE id = ?1", params![message_id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
