// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Colloquy book-club service.

use thiserror::Error;

/// The primary error type used across all Colloquy crates.
#[derive(Debug, Error)]
pub enum ColloquyError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The requested club does not exist (or has no joined book row).
    #[error("club not found: {club_id}")]
    ClubNotFound { club_id: String },

    /// LLM provider errors (API failure, network failure, timeout).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider answered successfully but the response carried no
    /// extractable text block. Surfaced to callers like a provider failure.
    #[error("provider returned a reply with no text content")]
    MalformedReply,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ColloquyError {
    /// True for failures of the model call itself, including a reply the
    /// caller cannot extract text from.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            ColloquyError::Provider { .. } | ColloquyError::MalformedReply
        )
    }
}
