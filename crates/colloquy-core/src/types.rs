// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the Colloquy workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Discriminant for who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SenderKind {
    Human,
    Agent,
}

/// The author of a message. Exactly one identity is carried, determined by
/// the kind: a user reference for human posts, a free-text persona name for
/// agent replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Sender {
    Human { user_id: i64 },
    Agent { persona_name: String },
}

impl Sender {
    pub fn kind(&self) -> SenderKind {
        match self {
            Sender::Human { .. } => SenderKind::Human,
            Sender::Agent { .. } => SenderKind::Agent,
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        match self {
            Sender::Human { user_id } => Some(*user_id),
            Sender::Agent { .. } => None,
        }
    }

    pub fn persona_name(&self) -> Option<&str> {
        match self {
            Sender::Human { .. } => None,
            Sender::Agent { persona_name } => Some(persona_name),
        }
    }
}

/// Structured metadata attached to a message, a closed set of known shapes.
///
/// Serialized into the `metadata` column as tagged JSON, e.g.
/// `{"kind":"completion","model":"...","input_tokens":12,"output_tokens":34}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessageMetadata {
    /// Provenance of an agent reply produced by a model completion call.
    Completion {
        model: String,
        input_tokens: u32,
        output_tokens: u32,
    },
}

/// One entry in a club's append-only message log.
///
/// The `id` is assigned by the store and is monotonically increasing within
/// the log; it doubles as the polling cursor for "new messages since".
/// Messages are never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub club_id: String,
    pub sender: Sender,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
    /// ISO 8601 UTC timestamp.
    pub created_at: String,
}

/// A message joined with its human sender's display name.
///
/// `sender_name` is `None` for agent rows and for users without a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageWithSender {
    #[serde(flatten)]
    pub message: Message,
    pub sender_name: Option<String>,
}

/// A member's self-reported reading position within a club, at most one row
/// per (club, member) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub club_id: String,
    pub user_id: i64,
    /// Percent through the book, 0 to 100 inclusive.
    pub position: u8,
    pub label: Option<String>,
    pub updated_at: String,
}

/// Reading progress joined with the member's display name, as consumed by the
/// spoiler guard and the progress listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProgress {
    pub user_id: i64,
    pub name: String,
    pub position: u8,
    pub label: Option<String>,
    pub updated_at: String,
}

/// A reader account. Identity is local to this deployment; there are no
/// credentials attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// One title in the book catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: Option<String>,
    /// Hand-written persona template overriding the generated default.
    pub persona_prompt: Option<String>,
}

/// Lifecycle state of a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClubStatus {
    Active,
    Archived,
}

/// A reading club: a group of members discussing one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub book_id: i64,
    pub creator_user_id: i64,
    /// Six characters from an ambiguity-free alphabet, unique per club.
    pub invite_code: String,
    pub status: ClubStatus,
    pub created_at: String,
}

/// A club joined with its book's display fields, the shape most listings want.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubWithBook {
    #[serde(flatten)]
    pub club: Club,
    pub book_title: String,
    pub book_author: String,
    pub publication_year: i32,
    pub genre: Option<String>,
}

/// Role of a member within a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Member,
}

/// A club roster entry joined with the member's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubMember {
    pub user_id: i64,
    pub name: String,
    pub role: MemberRole,
    pub joined_at: String,
}

/// The club-plus-book join the reply pipeline reads before anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubOverview {
    pub id: String,
    pub name: String,
    pub book_title: String,
    pub book_author: String,
    pub publication_year: i32,
    /// Stored per-book persona template, if the catalog carries one.
    pub persona_template: Option<String>,
}

/// Token counts reported by the provider for one completion call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Conversation role as submitted to the model provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One (role, content) pair in the assembled conversation window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}
