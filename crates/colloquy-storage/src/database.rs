// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional `Connection` instances for writes; clone the
//! handle instead.

use colloquy_core::ColloquyError;
use tracing::debug;

/// Handle to the service database.
///
/// Cloning is cheap: clones share the same background connection thread,
/// which is what keeps writes serialized.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Open (creating if needed) the database at `path` with WAL mode on,
    /// then run any pending migrations.
    pub async fn open(path: &str) -> Result<Self, ColloquyError> {
        Self::open_with_wal(path, true).await
    }

    /// Open the database at `path`, optionally in WAL mode.
    pub async fn open_with_wal(path: &str, wal_mode: bool) -> Result<Self, ColloquyError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| ColloquyError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.configure(wal_mode).await?;
        db.migrate().await?;
        debug!(path, wal_mode, "database open");
        Ok(db)
    }

    /// Open an in-memory database and run migrations. Test use only in
    /// practice; the rollback journal is kept since WAL needs a file.
    pub async fn open_in_memory() -> Result<Self, ColloquyError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| ColloquyError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.configure(false).await?;
        db.migrate().await?;
        Ok(db)
    }

    async fn configure(&self, wal_mode: bool) -> Result<(), ColloquyError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                if wal_mode {
                    conn.pragma_update(None, "journal_mode", "WAL")?;
                }
                conn.pragma_update(None, "foreign_keys", "ON")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn migrate(&self) -> Result<(), ColloquyError> {
        self.conn
            .call(crate::migrations::run_migrations)
            .await
            .map_err(|e| ColloquyError::Storage {
                source: Box::new(e),
            })
    }

    /// Returns a reference to the underlying connection handle.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection thread.
    pub async fn close(self) -> Result<(), ColloquyError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        self.conn.close().await.map_err(|e| ColloquyError::Storage {
            source: Box::new(e),
        })?;
        Ok(())
    }
}

/// Convert tokio-rusqlite errors to `ColloquyError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> ColloquyError {
    ColloquyError::Storage {
        source: Box::new(e),
    }
}

/// Current UTC time as an ISO 8601 string with millisecond precision,
/// matching the `strftime` format used in the schema defaults.
pub fn now_utc() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_applies_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colloquy.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();

        // Migrations ran: the seeded catalog is present.
        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(count, 3);

        db.close().await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colloquy.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();

        // Second open must not re-run applied migrations.
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(count, 3);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = Database::open_in_memory().await.unwrap();
        let result = db
            .connection()
            .call(|conn| -> Result<usize, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO clubs (id, name, book_id, creator_user_id, invite_code)
                     VALUES ('c1', 'Ghost club', 999, 999, 'AAAAAA')",
                    [],
                )
            })
            .await;
        assert!(result.is_err());
        db.close().await.unwrap();
    }

    #[test]
    fn now_utc_matches_schema_format() {
        let ts = now_utc();
        assert_eq!(ts.len(), 24);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }
}
