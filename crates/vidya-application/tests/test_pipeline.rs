//! End-to-end pipeline tests against a scripted model client.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use vidya_application::LessonPipeline;
use vidya_core::grade_quiz;
use vidya_core::model::{GenerateRequest, ModelClient};
use vidya_core::{LessonError, ModelError, PipelineStage};

const RAW_TRANSCRIPT: &str = "Okay um, settle down everyone. So, uh, today we look at \
Newton's third law. Um, for every action there is an equal and opposite reaction force. \
Uh, funny story about my car... anyway, homework is due Friday.";

const CLEANED_TEXT: &str = "Newton's third law states that for every action there is an \
equal and opposite reaction force.";

/// Routes each request to a canned stage response by inspecting its schema,
/// the way the real client routes on the wire contract.
struct ScriptedClient {
    calls: AtomicUsize,
    fail_stage: Option<PipelineStage>,
}

impl ScriptedClient {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_stage: None,
        })
    }

    fn failing_at(stage: PipelineStage) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_stage: Some(stage),
        })
    }

    fn stage_of(request: &GenerateRequest) -> PipelineStage {
        match &request.response_schema {
            None => PipelineStage::Clean,
            Some(schema) => {
                if schema.pointer("/properties/summary").is_some() {
                    PipelineStage::Summary
                } else if schema.pointer("/items/properties/marks").is_some() {
                    PipelineStage::ExamQuestions
                } else if schema.pointer("/items/properties/correctAnswer").is_some() {
                    PipelineStage::Quiz
                } else {
                    panic!("request with unrecognized schema");
                }
            }
        }
    }

    fn canned_response(stage: PipelineStage) -> String {
        match stage {
            PipelineStage::Clean => CLEANED_TEXT.to_string(),
            PipelineStage::Summary => json!({
                "summary": "Forces always come in equal and opposite pairs.",
                "examples": [
                    "Pushing off a wall while skating propels you backwards.",
                    "A rocket accelerates by expelling exhaust gases downwards.",
                    "A swimmer pushes water back to move forwards."
                ]
            })
            .to_string(),
            PipelineStage::ExamQuestions => json!([
                {"question": "State Newton's third law.", "marks": 1, "type": "Very Short",
                 "answerKey": "Every action has an equal and opposite reaction."},
                {"question": "Explain action-reaction pairs with one example.", "marks": 3,
                 "type": "Medium", "answerKey": "Forces act on different bodies; e.g. skater and wall."},
                {"question": "Describe how the third law explains rocket propulsion.", "marks": 5,
                 "type": "Long", "answerKey": "Exhaust pushed down, reaction pushes rocket up."}
            ])
            .to_string(),
            PipelineStage::Quiz => json!((1..=5)
                .map(|i| json!({
                    "id": i,
                    "question": format!("Quiz question {i} about reaction forces?"),
                    "options": ["Option A", "Option B", "Option C", "Option D"],
                    "correctAnswer": (i as usize - 1) % 4,
                    "explanation": "Follows directly from the third law."
                }))
                .collect::<Vec<_>>())
            .to_string(),
        }
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let stage = Self::stage_of(&request);
        if self.fail_stage == Some(stage) {
            return Err(ModelError::transport("injected failure"));
        }
        Ok(Self::canned_response(stage))
    }
}

#[tokio::test]
async fn test_newton_end_to_end() {
    let client = ScriptedClient::new();
    let pipeline = LessonPipeline::new(client.clone());

    let lesson = pipeline
        .run("Newton's Third Law", RAW_TRANSCRIPT)
        .await
        .unwrap();

    // Filler is gone, the law itself is preserved.
    assert!(!lesson.cleaned_transcript.contains("um"));
    assert!(!lesson.cleaned_transcript.contains("uh"));
    assert!(lesson.cleaned_transcript.contains("equal and opposite reaction"));
    assert_eq!(lesson.raw_transcript, RAW_TRANSCRIPT);

    assert!(!lesson.summary.is_empty());
    assert_eq!(lesson.real_life_examples.len(), 3);

    assert!(!lesson.exam_questions.is_empty());
    assert!(lesson.exam_questions.iter().all(|q| q.has_valid_marks()));
    let marks: Vec<u8> = lesson.exam_questions.iter().map(|q| q.marks).collect();
    assert!(marks.contains(&1) && marks.contains(&3) && marks.contains(&5));

    assert_eq!(lesson.quiz.len(), 5);
    for question in &lesson.quiz {
        assert_eq!(question.options.len(), 4);
        assert!(question.correct_answer < question.options.len());
    }

    // One clean call plus the three fan-out calls.
    assert_eq!(client.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_stage_two_failure_names_the_stage_and_yields_no_lesson() {
    for stage in [
        PipelineStage::Summary,
        PipelineStage::ExamQuestions,
        PipelineStage::Quiz,
    ] {
        let client = ScriptedClient::failing_at(stage);
        let pipeline = LessonPipeline::new(client);

        let err = pipeline.run("Topic", RAW_TRANSCRIPT).await.unwrap_err();
        assert_eq!(err.failed_stage(), Some(stage), "stage {stage} not preserved");
    }
}

#[tokio::test]
async fn test_clean_failure_aborts_before_fan_out() {
    let client = ScriptedClient::failing_at(PipelineStage::Clean);
    let pipeline = LessonPipeline::new(client.clone());

    let err = pipeline.run("Topic", RAW_TRANSCRIPT).await.unwrap_err();
    assert_eq!(err.failed_stage(), Some(PipelineStage::Clean));
    // No stage-2 request was ever issued.
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failing_input_is_idempotent() {
    let client = ScriptedClient::failing_at(PipelineStage::Quiz);
    let pipeline = LessonPipeline::new(client);

    let first = pipeline.run("Topic", RAW_TRANSCRIPT).await.unwrap_err();
    let second = pipeline.run("Topic", RAW_TRANSCRIPT).await.unwrap_err();
    assert_eq!(first, second);
    assert!(matches!(first, LessonError::Pipeline { .. }));
}

#[tokio::test]
async fn test_generated_quiz_is_gradeable() {
    let client = ScriptedClient::new();
    let pipeline = LessonPipeline::new(client);
    let lesson = pipeline.run("Topic", RAW_TRANSCRIPT).await.unwrap();

    // Answer three correctly, one wrong, one not at all.
    let mut answers = HashMap::new();
    for question in lesson.quiz.iter().take(3) {
        answers.insert(question.id, question.correct_answer);
    }
    let fourth = &lesson.quiz[3];
    answers.insert(fourth.id, (fourth.correct_answer + 1) % fourth.options.len());

    assert_eq!(grade_quiz(&lesson.quiz, &answers), 3);
}
