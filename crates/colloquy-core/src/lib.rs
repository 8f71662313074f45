// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Colloquy book-club service.
//!
//! Provides the error taxonomy and the domain types shared by the storage,
//! context-assembly, cost, and gateway crates.

pub mod error;
pub mod types;

pub use error::ColloquyError;
pub use types::{
    Book, Club, ClubMember, ClubOverview, ClubStatus, ClubWithBook, MemberProgress, MemberRole,
    Message, MessageMetadata, MessageWithSender, ReadingProgress, Sender, SenderKind, TokenUsage,
    Turn, TurnRole, User,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        let _config = ColloquyError::Config("test".into());
        let _storage = ColloquyError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _not_found = ColloquyError::ClubNotFound {
            club_id: "club-1".into(),
        };
        let _provider = ColloquyError::Provider {
            message: "test".into(),
            source: None,
        };
        let _malformed = ColloquyError::MalformedReply;
        let _internal = ColloquyError::Internal("test".into());
    }

    #[test]
    fn malformed_reply_counts_as_provider_failure() {
        assert!(ColloquyError::MalformedReply.is_provider_failure());
        assert!(
            ColloquyError::Provider {
                message: "503".into(),
                source: None,
            }
            .is_provider_failure()
        );
        assert!(
            !ColloquyError::ClubNotFound {
                club_id: "c".into()
            }
            .is_provider_failure()
        );
    }
}
