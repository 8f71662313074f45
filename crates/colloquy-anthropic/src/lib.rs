// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude adapter for the Colloquy book-club service.
//!
//! This crate wraps the Anthropic Messages API for single-shot, non-streaming
//! completions. The reply engine builds a [`MessageRequest`] from assembled
//! club context, and [`AnthropicClient`] handles authentication, transport,
//! and transient-error retry.

pub mod client;
pub mod types;

pub use client::AnthropicClient;
pub use types::{ApiMessage, MessageRequest, MessageResponse};
