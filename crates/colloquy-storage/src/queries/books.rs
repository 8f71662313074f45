// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Book catalog reads. The catalog is seeded by migration and has no write
//! path in the service itself.

use colloquy_core::ColloquyError;
use rusqlite::params;

use crate::database::Database;
use crate::models::Book;

fn book_from_row(row: &rusqlite::Row<'_>) -> Result<Book, rusqlite::Error> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        publication_year: row.get(3)?,
        genre: row.get(4)?,
        persona_prompt: row.get(5)?,
    })
}

/// List the full catalog, alphabetical by title.
pub async fn list_books(db: &Database) -> Result<Vec<Book>, ColloquyError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, author, publication_year, genre, persona_prompt
                 FROM books ORDER BY title ASC",
            )?;
            let rows = stmt.query_map([], book_from_row)?;
            let mut books = Vec::new();
            for row in rows {
                books.push(row?);
            }
            Ok(books)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get one catalog entry by id.
pub async fn get_book(db: &Database, book_id: i64) -> Result<Option<Book>, ColloquyError> {
    db.connection()
        .call(move |conn| {
            match conn.query_row(
                "SELECT id, title, author, publication_year, genre, persona_prompt
                 FROM books WHERE id = ?1",
                params![book_id],
                book_from_row,
            ) {
                Ok(book) => Ok(Some(book)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn catalog_is_seeded_and_sorted() {
        let (db, _dir) = setup_db().await;

        let books = list_books(&db).await.unwrap();
        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Frankenstein", "Moby-Dick", "Pride and Prejudice"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_book_by_id() {
        let (db, _dir) = setup_db().await;

        let books = list_books(&db).await.unwrap();
        let frankenstein = books.iter().find(|b| b.title == "Frankenstein").unwrap();

        let fetched = get_book(&db, frankenstein.id).await.unwrap().unwrap();
        assert_eq!(fetched.author, "Mary Shelley");
        assert_eq!(fetched.publication_year, 1818);
        assert!(fetched.persona_prompt.is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_book_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_book(&db, 404).await.unwrap().is_none());
        db.close().await.unwrap();
    }
}
