// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API request and response types.
//!
//! Only the non-streaming surface the reply pipeline uses: plain-text
//! conversation turns in, text content blocks out.

use colloquy_core::TokenUsage;
use serde::{Deserialize, Serialize};

/// A request to the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    /// Model identifier (e.g., "claude-sonnet-4-20250514").
    pub model: String,

    /// Conversation messages, oldest first.
    pub messages: Vec<ApiMessage>,

    /// System prompt, omitted from the wire when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Whether to stream the response. Always false here.
    pub stream: bool,
}

/// A single message in the Anthropic conversation format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Role: "user" or "assistant".
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// A full response from the Anthropic Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    /// Response ID.
    pub id: String,
    /// Response type (always "message").
    #[serde(rename = "type")]
    pub type_: String,
    /// Role (always "assistant").
    pub role: String,
    /// Content blocks in the response.
    pub content: Vec<ResponseContentBlock>,
    /// Model that generated the response.
    pub model: String,
    /// Reason the generation stopped.
    pub stop_reason: Option<String>,
    /// Token usage statistics.
    pub usage: ApiUsage,
}

impl MessageResponse {
    /// The first non-blank text block, if the response carries one.
    ///
    /// `None` means the reply is unusable: no content blocks, or text that
    /// is empty after trimming.
    pub fn primary_text(&self) -> Option<&str> {
        self.content
            .iter()
            .map(|ResponseContentBlock::Text { text }| text.as_str())
            .find(|text| !text.trim().is_empty())
    }
}

/// A content block in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResponseContentBlock {
    /// Text content block.
    #[serde(rename = "text")]
    Text { text: String },
}

/// Token usage statistics from the API.
///
/// The cache fields appear on real responses; they are parsed so
/// deserialization never trips over them, but the pipeline prices only
/// plain input and output tokens.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiUsage {
    /// Number of input tokens consumed.
    pub input_tokens: u32,
    /// Number of output tokens generated.
    pub output_tokens: u32,
    /// Number of tokens read from prompt cache.
    #[serde(default)]
    pub cache_read_input_tokens: u32,
    /// Number of tokens written to prompt cache.
    #[serde(default)]
    pub cache_creation_input_tokens: u32,
}

impl From<&ApiUsage> for TokenUsage {
    fn from(usage: &ApiUsage) -> Self {
        TokenUsage {
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
        }
    }
}

/// API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// Error detail within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Error type identifier.
    #[serde(rename = "type")]
    pub type_: String,
    /// Human-readable error message.
    pub message: String,
}
