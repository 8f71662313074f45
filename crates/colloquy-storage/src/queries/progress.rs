// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading progress operations. One row per (club, member) pair, updated in
//! place.

use colloquy_core::ColloquyError;
use rusqlite::params;

use crate::database::{Database, now_utc};
use crate::models::{MemberProgress, ReadingProgress};

/// Record a member's position in the book, replacing any earlier report.
pub async fn upsert_progress(
    db: &Database,
    club_id: &str,
    user_id: i64,
    position: u8,
    label: Option<&str>,
) -> Result<ReadingProgress, ColloquyError> {
    let club_id = club_id.to_string();
    let label = label.map(str::to_string);
    let updated_at = now_utc();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reading_progress (club_id, user_id, position, label, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (club_id, user_id) DO UPDATE SET
                     position = excluded.position,
                     label = excluded.label,
                     updated_at = excluded.updated_at",
                params![club_id, user_id, position, label, updated_at],
            )?;
            Ok(ReadingProgress {
                club_id,
                user_id,
                position,
                label,
                updated_at,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A member's reported position in a club, if they have reported one.
pub async fn progress_for_user(
    db: &Database,
    club_id: &str,
    user_id: i64,
) -> Result<Option<ReadingProgress>, ColloquyError> {
    let club_id = club_id.to_string();
    db.connection()
        .call(move |conn| {
            match conn.query_row(
                "SELECT club_id, user_id, position, label, updated_at
                 FROM reading_progress WHERE club_id = ?1 AND user_id = ?2",
                params![club_id, user_id],
                |row| {
                    Ok(ReadingProgress {
                        club_id: row.get(0)?,
                        user_id: row.get(1)?,
                        position: row.get(2)?,
                        label: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                },
            ) {
                Ok(progress) => Ok(Some(progress)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All reported positions in a club with member names, furthest reader first.
/// Members who have not reported do not appear.
pub async fn progress_for_club(
    db: &Database,
    club_id: &str,
) -> Result<Vec<MemberProgress>, ColloquyError> {
    let club_id = club_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT rp.user_id, u.name, rp.position, rp.label, rp.updated_at
                 FROM reading_progress rp JOIN users u ON rp.user_id = u.id
                 WHERE rp.club_id = ?1
                 ORDER BY rp.position DESC, rp.updated_at ASC",
            )?;
            let rows = stmt.query_map(params![club_id], |row| {
                Ok(MemberProgress {
                    user_id: row.get(0)?,
                    name: row.get(1)?,
                    position: row.get(2)?,
                    label: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            })?;
            let mut progress = Vec::new();
            for row in rows {
                progress.push(row?);
            }
            Ok(progress)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
