// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context assembly for Colloquy author-persona replies.
//!
//! Given a club, this crate produces everything a completion call needs: a
//! composed system directive (app framing, author persona, spoiler guard)
//! and a bounded, chronologically ordered, speaker-annotated conversation
//! window. Assembly is a pure function of stored state at call time.

pub mod assembler;
pub mod directive;

pub use assembler::{AssembledContext, ContextAssembler};
