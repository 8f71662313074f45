// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply orchestration for the Colloquy book-club service.
//!
//! [`ReplyEngine`] is the one place that ties the pipeline together: context
//! assembly, the provider completion call, usage recording, and persisting
//! the agent reply.

pub mod engine;

pub use engine::{ReplyEngine, ReplyPhase};
