// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `colloquy-core::types` for use across
//! crate boundaries. This module re-exports them for convenience within the
//! storage crate.

pub use colloquy_core::types::{
    Book, Club, ClubMember, ClubOverview, ClubStatus, ClubWithBook, MemberProgress, MemberRole,
    Message, MessageMetadata, MessageWithSender, ReadingProgress, Sender, User,
};
