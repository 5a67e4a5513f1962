//! Stage request builders.
//!
//! Each function builds one model request (prompt plus, where structured
//! output is needed, a response schema), sends it through the [`ModelClient`]
//! seam, and parse-or-fails the response at this boundary. Counts and ranges
//! declared in a schema are enforced here as well: a response that parses but
//! carries the wrong number of quiz questions is as unusable as one that does
//! not parse.

use serde::Deserialize;
use serde_json::json;
use vidya_core::lesson::{
    ExamQuestion, MAX_MARKS, MIN_MARKS, OPTIONS_PER_QUESTION, QUIZ_LEN, QuizQuestion,
};
use vidya_core::model::{GenerateRequest, MediaAttachment, ModelClient};
use vidya_core::{ModelError, TranscriptionError};

/// Number of real-life examples the summary stage must produce.
pub const EXAMPLE_COUNT: usize = 3;

/// Output of the summary stage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummaryAndExamples {
    /// A comprehensive summary of the lesson.
    pub summary: String,
    /// Real-life analogies explaining the concepts.
    pub examples: Vec<String>,
}

/// Transcribes uploaded media to plain text.
///
/// Runs strictly before the lesson pipeline and is retryable on its own; a
/// failure here never affects an already-running pipeline.
pub async fn transcribe_media(
    client: &dyn ModelClient,
    bytes: Vec<u8>,
    mime_type: &str,
) -> Result<String, TranscriptionError> {
    let request = GenerateRequest::new(
        "Please transcribe the spoken audio in this recording verbatim. \
         Ignore background noise and just provide the speech content.",
    )
    .with_attachment(MediaAttachment::new(bytes, mime_type));

    let text = client.generate(request).await?;
    Ok(text.trim().to_string())
}

/// Stage 1: cleans the raw transcript into filtered study text.
pub async fn clean_transcript(
    client: &dyn ModelClient,
    raw_transcript: &str,
) -> Result<String, ModelError> {
    let prompt = format!(
        "You are an expert educational editor. Your task is to clean the following lecture transcript.\n\
         1. Remove all conversational fillers (um, ah, like).\n\
         2. Remove jokes, off-topic banter, and classroom administrative talk.\n\
         3. Strictly preserve the educational content, facts, and explanations.\n\
         4. The output should be the \"Filtered Text\" ready for study.\n\n\
         Transcript:\n{raw_transcript}"
    );

    let text = client.generate(GenerateRequest::new(prompt)).await?;
    Ok(text.trim().to_string())
}

/// Stage 2a: summary plus exactly three real-life examples.
pub async fn generate_summary_and_examples(
    client: &dyn ModelClient,
    cleaned_text: &str,
) -> Result<SummaryAndExamples, ModelError> {
    let prompt = format!(
        "Based on the following educational text, provide a concise summary and {EXAMPLE_COUNT} \
         distinct real-life examples that help explain the concepts.\n\nText: {cleaned_text}"
    );
    let schema = json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A comprehensive summary of the lesson."
            },
            "examples": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "3 real-life analogies or examples explaining the concept."
            }
        },
        "required": ["summary", "examples"]
    });

    let result: SummaryAndExamples =
        generate_json(client, GenerateRequest::new(prompt).with_response_schema(schema)).await?;

    if result.examples.len() != EXAMPLE_COUNT {
        return Err(ModelError::schema_mismatch(format!(
            "expected {EXAMPLE_COUNT} examples, got {}",
            result.examples.len()
        )));
    }
    Ok(result)
}

/// Stage 2b: exam questions spanning the 1-5 mark tiers.
pub async fn generate_exam_questions(
    client: &dyn ModelClient,
    cleaned_text: &str,
) -> Result<Vec<ExamQuestion>, ModelError> {
    let prompt = format!(
        "Create a set of exam questions based on this filtered educational text.\n\
         Generate a balanced mix of questions worth 1, 2, 3, 4, and 5 marks.\n\
         - 1-2 marks: Very Short Answer (Definitions, simple facts)\n\
         - 3-4 marks: Short/Medium Answer (Explanations, reasoning)\n\
         - 5 marks: Long Answer (Detailed description, derivation, or complex application)\n\n\
         Include a brief answer key or main points for each question.\n\nText: {cleaned_text}"
    );
    let schema = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "marks": { "type": "INTEGER", "description": "Must be 1, 2, 3, 4, or 5" },
                "type": { "type": "STRING", "enum": ["Very Short", "Short", "Medium", "Long"] },
                "answerKey": {
                    "type": "STRING",
                    "description": "A concise model answer or key points expected in the answer."
                }
            },
            "required": ["question", "marks", "type", "answerKey"]
        }
    });

    let questions: Vec<ExamQuestion> =
        generate_json(client, GenerateRequest::new(prompt).with_response_schema(schema)).await?;

    if questions.is_empty() {
        return Err(ModelError::schema_mismatch("exam question set is empty"));
    }
    if let Some(bad) = questions.iter().find(|q| !q.has_valid_marks()) {
        return Err(ModelError::schema_mismatch(format!(
            "marks {} outside the {MIN_MARKS}-{MAX_MARKS} range",
            bad.marks
        )));
    }
    Ok(questions)
}

/// Stage 2c: a five-question multiple-choice quiz.
pub async fn generate_quiz(
    client: &dyn ModelClient,
    cleaned_text: &str,
) -> Result<Vec<QuizQuestion>, ModelError> {
    let prompt = format!(
        "Create a multiple-choice quiz with {QUIZ_LEN} questions based on this filtered text \
         to test understanding. Include an explanation for the correct answer.\n\nText: {cleaned_text}"
    );
    let schema = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "INTEGER" },
                "question": { "type": "STRING" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Array of 4 possible answers"
                },
                "correctAnswer": {
                    "type": "INTEGER",
                    "description": "Index of the correct option (0-3)"
                },
                "explanation": {
                    "type": "STRING",
                    "description": "A brief explanation of why the correct answer is the right choice."
                }
            },
            "required": ["id", "question", "options", "correctAnswer", "explanation"]
        }
    });

    let quiz: Vec<QuizQuestion> =
        generate_json(client, GenerateRequest::new(prompt).with_response_schema(schema)).await?;

    if quiz.len() != QUIZ_LEN {
        return Err(ModelError::schema_mismatch(format!(
            "expected {QUIZ_LEN} quiz questions, got {}",
            quiz.len()
        )));
    }
    if let Some(bad) = quiz.iter().find(|q| !q.is_well_formed()) {
        return Err(ModelError::schema_mismatch(format!(
            "quiz question {} must have {OPTIONS_PER_QUESTION} options and a valid answer index",
            bad.id
        )));
    }
    let mut ids: Vec<u32> = quiz.iter().map(|q| q.id).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != quiz.len() {
        return Err(ModelError::schema_mismatch("quiz question ids are not unique"));
    }
    Ok(quiz)
}

/// Sends a schema-carrying request and parses the JSON response.
async fn generate_json<T: serde::de::DeserializeOwned>(
    client: &dyn ModelClient,
    request: GenerateRequest,
) -> Result<T, ModelError> {
    let text = client.generate(request).await?;
    serde_json::from_str(text.trim())
        .map_err(|err| ModelError::schema_mismatch(format!("invalid JSON payload: {err}")))
}
