//! Error types for the Vidya application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error from a single model client call.
///
/// The variants distinguish the three failure classes a caller may need to
/// react to: the request never produced a usable response (`Transport`), the
/// response arrived but did not satisfy the declared output contract
/// (`SchemaMismatch`), or the model answered with no text at all
/// (`EmptyResponse`).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelError {
    /// Network or HTTP-level failure (connect error, timeout, non-2xx status).
    #[error("model request failed: {message}")]
    Transport {
        status_code: Option<u16>,
        message: String,
    },

    /// The response text did not parse into the declared schema, or violated
    /// a declared count/range constraint.
    #[error("model response did not match the expected schema: {0}")]
    SchemaMismatch(String),

    /// The model returned no candidate text.
    #[error("model returned an empty response")]
    EmptyResponse,
}

impl ModelError {
    /// Creates a Transport error without an HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error carrying an HTTP status code.
    pub fn transport_with_status(status_code: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// Creates a SchemaMismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch(message.into())
    }

    /// Check if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a schema mismatch.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch(_))
    }
}

/// The model-backed stages of the lesson pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStage {
    Clean,
    Summary,
    ExamQuestions,
    Quiz,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Summary => "summary",
            Self::ExamQuestions => "exam-questions",
            Self::Quiz => "quiz",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error from a lesson-generation attempt.
///
/// A failed attempt never yields a partial lesson: either the inputs were
/// rejected before any network call, or one of the pipeline stages failed and
/// the whole attempt was discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LessonError {
    /// A required input was empty or whitespace-only. Raised before any
    /// model call is made.
    #[error("validation failed: {field} must not be empty")]
    Validation { field: &'static str },

    /// A pipeline stage failed; the stage name is preserved so the caller
    /// can report which step broke.
    #[error("lesson pipeline failed at the {stage} stage: {source}")]
    Pipeline {
        stage: PipelineStage,
        source: ModelError,
    },
}

impl LessonError {
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }

    pub fn pipeline(stage: PipelineStage, source: ModelError) -> Self {
        Self::Pipeline { stage, source }
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns the failed stage, if this is a pipeline error.
    pub fn failed_stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Pipeline { stage, .. } => Some(*stage),
            Self::Validation { .. } => None,
        }
    }
}

/// Error from the optional media-transcription pre-stage.
///
/// Transcription runs strictly before the atomic pipeline, so its failure is
/// independent of `LessonError` and never rolls back a pipeline run.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("media transcription failed: {0}")]
pub struct TranscriptionError(#[from] pub ModelError);

/// Local precondition failures of a tutor chat session.
///
/// Model failures are not represented here; the session swallows them into a
/// fallback assistant message instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatSessionError {
    /// The outgoing message was empty or whitespace-only.
    #[error("message text must not be empty")]
    EmptyMessage,
}
