//! The model client seam.
//!
//! `ModelClient` is the single trait through which every stage, chat turn,
//! and generator reaches the remote generative model. Implementations are
//! stateless per call; conversation context is threaded explicitly through
//! the request's `history` field.

use crate::chat::MessageRole;
use crate::error::ModelError;
use async_trait::async_trait;

/// One prior conversation turn, replayed as context on a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Model,
            text: text.into(),
        }
    }
}

/// A binary attachment sent inline with a prompt (media transcription).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl MediaAttachment {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// A single generation request.
///
/// When `response_schema` is set the client must ask the model for JSON
/// conforming to that shape; the returned text is then parse-or-fail at the
/// caller's boundary.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// The prompt text for the current turn.
    pub prompt: String,
    /// Optional instruction sent alongside every content turn.
    pub system_instruction: Option<String>,
    /// Prior conversation turns, oldest first.
    pub history: Vec<ChatTurn>,
    /// Optional inline binary attachment (bytes + MIME type).
    pub attachment: Option<MediaAttachment>,
    /// Optional structural contract the response must satisfy.
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_attachment(mut self, attachment: MediaAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// A thin request/response seam over a remote generative-model endpoint.
///
/// Implementations perform no retries and hold no per-call state; any failure
/// is surfaced as a [`ModelError`] distinguishing transport faults, schema
/// mismatches, and empty responses.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Sends one generation request and returns the generated text.
    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError>;
}
