// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Club and membership operations.
//!
//! Invite-code allocation and the join flow run inside transactions on the
//! single writer thread, so check-then-insert sequences here do not race.

use colloquy_core::ColloquyError;
use rand::Rng;
use rusqlite::params;

use crate::database::{Database, now_utc};
use crate::models::{Club, ClubMember, ClubOverview, ClubStatus, ClubWithBook, MemberRole};

/// Characters used in invite codes. 0/O and 1/I are left out so codes
/// survive being read aloud.
const INVITE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

const INVITE_CODE_LEN: usize = 6;

/// Bound on the search for an unused invite code.
const INVITE_CODE_ATTEMPTS: usize = 8;

/// Clubs hold at most this many members, the owner included.
pub const MAX_MEMBERS: i64 = 5;

/// Result of attempting to join a club by invite code.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    Joined(ClubWithBook),
    AlreadyMember(ClubWithBook),
    Full,
    InvalidCode,
}

fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| INVITE_ALPHABET[rng.gen_range(0..INVITE_ALPHABET.len())] as char)
        .collect()
}

fn status_from_sql(idx: usize, raw: String) -> Result<ClubStatus, rusqlite::Error> {
    raw.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unrecognized club status `{raw}`").into(),
        )
    })
}

fn role_from_sql(idx: usize, raw: String) -> Result<MemberRole, rusqlite::Error> {
    raw.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unrecognized member role `{raw}`").into(),
        )
    })
}

/// Maps the 11-column club-plus-book select used by every listing query.
fn club_with_book_from_row(row: &rusqlite::Row<'_>) -> Result<ClubWithBook, rusqlite::Error> {
    let status = status_from_sql(5, row.get(5)?)?;
    Ok(ClubWithBook {
        club: Club {
            id: row.get(0)?,
            name: row.get(1)?,
            book_id: row.get(2)?,
            creator_user_id: row.get(3)?,
            invite_code: row.get(4)?,
            status,
            created_at: row.get(6)?,
        },
        book_title: row.get(7)?,
        book_author: row.get(8)?,
        publication_year: row.get(9)?,
        genre: row.get(10)?,
    })
}

const CLUB_WITH_BOOK_SELECT: &str = "SELECT c.id, c.name, c.book_id, c.creator_user_id,
        c.invite_code, c.status, c.created_at,
        b.title, b.author, b.publication_year, b.genre
 FROM clubs c JOIN books b ON c.book_id = b.id";

/// Create a club with a freshly allocated invite code, enrolling the creator
/// as owner. Both inserts commit atomically.
pub async fn create_club(
    db: &Database,
    name: &str,
    book_id: i64,
    creator_user_id: i64,
) -> Result<Club, ColloquyError> {
    let name = name.to_string();
    let club_id = uuid::Uuid::new_v4().to_string();
    let created_at = now_utc();
    let created = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let mut code = None;
            for _ in 0..INVITE_CODE_ATTEMPTS {
                let candidate = generate_invite_code();
                let taken: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM clubs WHERE invite_code = ?1)",
                    params![candidate],
                    |row| row.get(0),
                )?;
                if !taken {
                    code = Some(candidate);
                    break;
                }
            }
            let Some(invite_code) = code else {
                return Ok(None);
            };
            tx.execute(
                "INSERT INTO clubs (id, name, book_id, creator_user_id, invite_code, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6)",
                params![club_id, name, book_id, creator_user_id, invite_code, created_at],
            )?;
            tx.execute(
                "INSERT INTO club_members (club_id, user_id, role, joined_at)
                 VALUES (?1, ?2, 'owner', ?3)",
                params![club_id, creator_user_id, created_at],
            )?;
            tx.commit()?;
            Ok(Some(Club {
                id: club_id,
                name,
                book_id,
                creator_user_id,
                invite_code,
                status: ClubStatus::Active,
                created_at,
            }))
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    created.ok_or_else(|| ColloquyError::Internal("could not allocate an unused invite code".into()))
}

/// Get a club with its book's display fields.
pub async fn get_club(db: &Database, club_id: &str) -> Result<Option<ClubWithBook>, ColloquyError> {
    let club_id = club_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!("{CLUB_WITH_BOOK_SELECT} WHERE c.id = ?1");
            match conn.query_row(&sql, params![club_id], club_with_book_from_row) {
                Ok(club) => Ok(Some(club)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the club-plus-book fields the reply pipeline needs, including the
/// book's stored persona template if any.
pub async fn get_club_overview(
    db: &Database,
    club_id: &str,
) -> Result<Option<ClubOverview>, ColloquyError> {
    let club_id = club_id.to_string();
    db.connection()
        .call(move |conn| {
            match conn.query_row(
                "SELECT c.id, c.name, b.title, b.author, b.publication_year, b.persona_prompt
                 FROM clubs c JOIN books b ON c.book_id = b.id
                 WHERE c.id = ?1",
                params![club_id],
                |row| {
                    Ok(ClubOverview {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        book_title: row.get(2)?,
                        book_author: row.get(3)?,
                        publication_year: row.get(4)?,
                        persona_template: row.get(5)?,
                    })
                },
            ) {
                Ok(overview) => Ok(Some(overview)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List the clubs a reader belongs to, most recently created first.
pub async fn list_clubs_for_user(
    db: &Database,
    user_id: i64,
) -> Result<Vec<ClubWithBook>, ColloquyError> {
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "{CLUB_WITH_BOOK_SELECT}
                 JOIN club_members cm ON cm.club_id = c.id
                 WHERE cm.user_id = ?1
                 ORDER BY c.created_at DESC, c.rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![user_id], club_with_book_from_row)?;
            let mut clubs = Vec::new();
            for row in rows {
                clubs.push(row?);
            }
            Ok(clubs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Join a club by invite code. The lookup is case-insensitive; codes are
/// stored and compared uppercase.
pub async fn join_by_invite_code(
    db: &Database,
    code: &str,
    user_id: i64,
) -> Result<JoinOutcome, ColloquyError> {
    let code = code.trim().to_uppercase();
    let joined_at = now_utc();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let sql = format!(
                "{CLUB_WITH_BOOK_SELECT} WHERE c.invite_code = ?1 AND c.status = 'active'"
            );
            let club = match tx.query_row(&sql, params![code], club_with_book_from_row) {
                Ok(club) => club,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(JoinOutcome::InvalidCode),
                Err(e) => return Err(e),
            };
            let already: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM club_members WHERE club_id = ?1 AND user_id = ?2)",
                params![club.club.id, user_id],
                |row| row.get(0),
            )?;
            if already {
                return Ok(JoinOutcome::AlreadyMember(club));
            }
            let members: i64 = tx.query_row(
                "SELECT COUNT(*) FROM club_members WHERE club_id = ?1",
                params![club.club.id],
                |row| row.get(0),
            )?;
            if members >= MAX_MEMBERS {
                return Ok(JoinOutcome::Full);
            }
            tx.execute(
                "INSERT INTO club_members (club_id, user_id, role, joined_at)
                 VALUES (?1, ?2, 'member', ?3)",
                params![club.club.id, user_id, joined_at],
            )?;
            tx.commit()?;
            Ok(JoinOutcome::Joined(club))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Whether the reader belongs to the club.
pub async fn is_member(db: &Database, club_id: &str, user_id: i64) -> Result<bool, ColloquyError> {
    let club_id = club_id.to_string();
    db.connection()
        .call(move |conn| {
            let already: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM club_members WHERE club_id = ?1 AND user_id = ?2)",
                params![club_id, user_id],
                |row| row.get(0),
            )?;
            Ok(already)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List a club's roster in join order.
pub async fn list_members(db: &Database, club_id: &str) -> Result<Vec<ClubMember>, ColloquyError> {
    let club_id = club_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT cm.user_id, u.name, cm.role, cm.joined_at
                 FROM club_members cm JOIN users u ON cm.user_id = u.id
                 WHERE cm.club_id = ?1
                 ORDER BY cm.joined_at ASC, cm.id ASC",
            )?;
            let rows = stmt.query_map(params![club_id], |row| {
                let role = role_from_sql(2, row.get(2)?)?;
                Ok(ClubMember {
                    user_id: row.get(0)?,
                    name: row.get(1)?,
                    role,
                    joined_at: row.get(3)?,
                })
            })?;
            let mut members = Vec::new();
            for row in rows {
                members.push(row?);
            }
            Ok(members)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Display names of a club's members in join order, skipping blank names.
pub async fn roster_names(db: &Database, club_id: &str) -> Result<Vec<String>, ColloquyError> {
    let club_id = club_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT u.name
                 FROM club_members cm JOIN users u ON cm.user_id = u.id
                 WHERE cm.club_id = ?1 AND TRIM(u.name) <> ''
                 ORDER BY cm.joined_at ASC, cm.id ASC",
            )?;
            let rows = stmt.query_map(params![club_id], |row| row.get(0))?;
            let mut names = Vec::new();
            for row in rows {
                names.push(row?);
            }
            Ok(names)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
