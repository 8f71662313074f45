// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives one author-persona reply end to end.
//!
//! Each invocation walks a small per-request FSM:
//! Idle -> Assembling -> Calling -> Recording -> Persisting -> Done, with
//! Failed reachable from any active phase. The engine performs no retries of
//! its own; a failed reply is reported to the caller, who may re-invoke.
//! Usage recording happens before the reply is persisted and is
//! fire-and-forget: a lost usage entry never fails the reply.

use colloquy_anthropic::{AnthropicClient, ApiMessage, MessageRequest};
use colloquy_context::{AssembledContext, ContextAssembler};
use colloquy_core::{ColloquyError, Message, MessageMetadata, Sender, TokenUsage};
use colloquy_cost::{Feature, UsageEntry, UsageRecorder};
use colloquy_storage::Database;
use colloquy_storage::queries::messages;
use tracing::{debug, info};

/// Phases of a single reply generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPhase {
    /// Not yet started.
    Idle,
    /// Reading club state and composing the directive.
    Assembling,
    /// Waiting on the model provider.
    Calling,
    /// Enqueueing the usage entry.
    Recording,
    /// Writing the reply message.
    Persisting,
    /// Reply persisted and returned.
    Done,
    /// Aborted; nothing after the failing phase ran.
    Failed,
}

impl std::fmt::Display for ReplyPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplyPhase::Idle => write!(f, "idle"),
            ReplyPhase::Assembling => write!(f, "assembling"),
            ReplyPhase::Calling => write!(f, "calling"),
            ReplyPhase::Recording => write!(f, "recording"),
            ReplyPhase::Persisting => write!(f, "persisting"),
            ReplyPhase::Done => write!(f, "done"),
            ReplyPhase::Failed => write!(f, "failed"),
        }
    }
}

/// Orchestrates author-persona replies: assemble, call, record, persist.
#[derive(Clone)]
pub struct ReplyEngine {
    db: Database,
    assembler: ContextAssembler,
    client: AnthropicClient,
    recorder: UsageRecorder,
}

impl ReplyEngine {
    /// Creates an engine over the shared database, assembler, provider
    /// client, and usage recorder.
    pub fn new(
        db: Database,
        assembler: ContextAssembler,
        client: AnthropicClient,
        recorder: UsageRecorder,
    ) -> Self {
        Self {
            db,
            assembler,
            client,
            recorder,
        }
    }

    /// Generates, records, and persists one author reply for a club.
    ///
    /// Fails with [`ColloquyError::ClubNotFound`] for an unknown club,
    /// [`ColloquyError::Provider`] when the completion call fails, and
    /// [`ColloquyError::MalformedReply`] when the provider answer carries no
    /// text. None of these persist anything.
    pub async fn generate_reply(&self, club_id: &str) -> Result<Message, ColloquyError> {
        let mut phase = ReplyPhase::Idle;
        match self.run(club_id, &mut phase).await {
            Ok(message) => {
                transition(club_id, &mut phase, ReplyPhase::Done);
                Ok(message)
            }
            Err(e) => {
                transition(club_id, &mut phase, ReplyPhase::Failed);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        club_id: &str,
        phase: &mut ReplyPhase,
    ) -> Result<Message, ColloquyError> {
        transition(club_id, phase, ReplyPhase::Assembling);
        let context = self.assembler.assemble(club_id).await?;

        transition(club_id, phase, ReplyPhase::Calling);
        let request = self.build_request(&context);
        let response = self.client.complete_message(&request).await?;

        let body = response
            .primary_text()
            .ok_or(ColloquyError::MalformedReply)?
            .to_string();
        let usage = TokenUsage::from(&response.usage);

        // Usage is logged before the reply is saved, so a persist failure
        // still leaves the call accounted for.
        transition(club_id, phase, ReplyPhase::Recording);
        self.recorder.record(UsageEntry {
            feature: Feature::AuthorResponse,
            club_id: Some(club_id.to_string()),
            model: self.client.default_model().to_string(),
            usage,
        });

        transition(club_id, phase, ReplyPhase::Persisting);
        let sender = Sender::Agent {
            persona_name: context.persona_name.clone(),
        };
        let metadata = MessageMetadata::Completion {
            model: self.client.default_model().to_string(),
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
        };
        let message =
            messages::insert_message(&self.db, club_id, &sender, &body, Some(&metadata)).await?;

        info!(
            club_id,
            message_id = message.id,
            persona = %context.persona_name,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "author reply persisted"
        );

        Ok(message)
    }

    /// Builds the provider request from assembled context and client defaults.
    fn build_request(&self, context: &AssembledContext) -> MessageRequest {
        let messages = context
            .turns
            .iter()
            .map(|turn| ApiMessage {
                role: turn.role.to_string(),
                content: turn.content.clone(),
            })
            .collect();

        MessageRequest {
            model: self.client.default_model().to_string(),
            messages,
            system: Some(context.system_directive.clone()),
            max_tokens: self.client.max_tokens(),
            stream: false,
        }
    }
}

fn transition(club_id: &str, phase: &mut ReplyPhase, to: ReplyPhase) {
    debug!(club_id, from = %phase, to = %to, "reply phase");
    *phase = to;
}
