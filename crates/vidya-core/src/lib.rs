//! Domain layer for Vidya: lesson records, the model-client seam, error
//! taxonomy, and the view-state struct the outer layers operate on.

pub mod analytics;
pub mod app_state;
pub mod appointment;
pub mod chat;
pub mod error;
pub mod lesson;
pub mod model;
pub mod notification;
pub mod role;

pub use app_state::AppState;
pub use chat::{ChatMessage, MessageRole};
pub use error::{ChatSessionError, LessonError, ModelError, PipelineStage, TranscriptionError};
pub use lesson::{ExamQuestion, Lesson, QuizQuestion, grade_quiz};
pub use model::{ChatTurn, GenerateRequest, MediaAttachment, ModelClient};
pub use role::Role;
