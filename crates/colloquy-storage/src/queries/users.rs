// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reader account CRUD operations.

use colloquy_core::ColloquyError;
use rusqlite::params;

use crate::database::{Database, now_utc};
use crate::models::User;

/// Create a reader account and return the stored row.
pub async fn create_user(db: &Database, name: &str) -> Result<User, ColloquyError> {
    let name = name.to_string();
    let created_at = now_utc();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (name, created_at) VALUES (?1, ?2)",
                params![name, created_at],
            )?;
            Ok(User {
                id: conn.last_insert_rowid(),
                name,
                created_at,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a reader by id.
pub async fn get_user(db: &Database, user_id: i64) -> Result<Option<User>, ColloquyError> {
    db.connection()
        .call(move |conn| {
            match conn.query_row(
                "SELECT id, name, created_at FROM users WHERE id = ?1",
                params![user_id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            ) {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Change a reader's display name. Returns the updated row, or `None` if no
/// such reader exists.
pub async fn rename_user(
    db: &Database,
    user_id: i64,
    name: &str,
) -> Result<Option<User>, ColloquyError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE users SET name = ?1 WHERE id = ?2",
                params![name, user_id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let user = conn.query_row(
                "SELECT id, name, created_at FROM users WHERE id = ?1",
                params![user_id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )?;
            Ok(Some(user))
        })
        .await
        .map_err(crate::database::map_tr_err)
}
