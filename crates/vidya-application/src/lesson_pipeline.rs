//! Lesson pipeline orchestrator.
//!
//! Turns `(topic, raw transcript)` into a complete [`Lesson`] or fails
//! atomically. Stage 1 (clean) must finish before the three stage-2
//! generators start, because they all consume the cleaned text; the three
//! generators then run concurrently and fail together: any single failure
//! discards the whole attempt, so no partially-populated lesson ever reaches
//! a student.

use std::sync::Arc;
use vidya_core::lesson::Lesson;
use vidya_core::model::ModelClient;
use vidya_core::{LessonError, PipelineStage};

use crate::stages;

/// Orchestrates the Clean -> {Summary, ExamQuestions, Quiz} sequence.
pub struct LessonPipeline {
    client: Arc<dyn ModelClient>,
}

impl LessonPipeline {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Builds a pipeline over the Gemini client configured from the
    /// environment or secret.json.
    pub fn gemini_from_env() -> Result<Self, String> {
        let client = vidya_interaction::GeminiClient::try_from_env()?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Runs the full pipeline.
    ///
    /// Empty or whitespace-only inputs are rejected before any model call.
    /// The returned error always names the stage that failed; partial results
    /// from sibling stage-2 calls are discarded.
    pub async fn run(&self, topic: &str, raw_transcript: &str) -> Result<Lesson, LessonError> {
        if topic.trim().is_empty() {
            return Err(LessonError::validation("topic"));
        }
        if raw_transcript.trim().is_empty() {
            return Err(LessonError::validation("rawTranscript"));
        }

        tracing::info!(topic, "starting lesson pipeline");

        let client = self.client.as_ref();
        let cleaned = stages::clean_transcript(client, raw_transcript)
            .await
            .map_err(|source| LessonError::pipeline(PipelineStage::Clean, source))?;
        tracing::debug!(chars = cleaned.len(), "transcript cleaned");

        // Launch all three before suspending on any; try_join! polls them
        // concurrently and surfaces the first error.
        let (summary, exam_questions, quiz) = tokio::try_join!(
            async {
                stages::generate_summary_and_examples(client, &cleaned)
                    .await
                    .map_err(|source| LessonError::pipeline(PipelineStage::Summary, source))
            },
            async {
                stages::generate_exam_questions(client, &cleaned)
                    .await
                    .map_err(|source| LessonError::pipeline(PipelineStage::ExamQuestions, source))
            },
            async {
                stages::generate_quiz(client, &cleaned)
                    .await
                    .map_err(|source| LessonError::pipeline(PipelineStage::Quiz, source))
            },
        )
        .inspect_err(|err| {
            tracing::warn!(stage = ?err.failed_stage(), "lesson pipeline failed");
        })?;

        tracing::info!(
            topic,
            exam_questions = exam_questions.len(),
            quiz_questions = quiz.len(),
            "lesson pipeline complete"
        );

        Ok(Lesson::new(
            topic,
            raw_transcript,
            cleaned,
            summary.summary,
            summary.examples,
            exam_questions,
            quiz,
        ))
    }
}
