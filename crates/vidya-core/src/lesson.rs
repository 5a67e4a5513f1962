//! Lesson domain model.
//!
//! A `Lesson` is assembled by the pipeline only when every generated section
//! is present; there is no partially-populated state. Wire names use
//! camelCase to match the published lesson data contract.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Lowest mark an exam question may carry.
pub const MIN_MARKS: u8 = 1;
/// Highest mark an exam question may carry.
pub const MAX_MARKS: u8 = 5;
/// Number of questions a generated quiz must contain.
pub const QUIZ_LEN: usize = 5;
/// Number of answer options each quiz question must offer.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Expected answer length tier of an exam question, correlated with marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "Very Short")]
    VeryShort,
    Short,
    Medium,
    Long,
}

/// A written exam question with its mark weight and model answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestion {
    pub question: String,
    /// One of 1..=5; higher marks imply longer expected answers.
    pub marks: u8,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// A concise model answer or the key points expected in the answer.
    pub answer_key: String,
}

impl ExamQuestion {
    /// Whether the marks value lies within the defined tier range.
    pub fn has_valid_marks(&self) -> bool {
        (MIN_MARKS..=MAX_MARKS).contains(&self.marks)
    }
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Unique within a quiz; used for answer lookup when grading.
    pub id: u32,
    pub question: String,
    /// Exactly [`OPTIONS_PER_QUESTION`] choices.
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: usize,
    /// Why the correct answer is right.
    pub explanation: String,
}

impl QuizQuestion {
    /// Whether `correct_answer` indexes a valid option and the option count
    /// matches the contract.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() == OPTIONS_PER_QUESTION && self.correct_answer < self.options.len()
    }
}

/// A complete published lesson.
///
/// Created by the pipeline on success and immutable thereafter. Every
/// generated section is populated: a lesson with, say, no quiz never exists,
/// because the pipeline discards the whole attempt instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Unique lesson identifier (UUID format).
    pub id: String,
    pub topic: String,
    /// The transcript as submitted, before any cleaning.
    pub raw_transcript: String,
    /// The filtered study text every later stage was generated from.
    pub cleaned_transcript: String,
    pub summary: String,
    /// Real-life analogies illustrating the concepts.
    pub real_life_examples: Vec<String>,
    pub exam_questions: Vec<ExamQuestion>,
    pub quiz: Vec<QuizQuestion>,
}

impl Lesson {
    /// Assembles a lesson with a fresh UUID.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topic: impl Into<String>,
        raw_transcript: impl Into<String>,
        cleaned_transcript: impl Into<String>,
        summary: impl Into<String>,
        real_life_examples: Vec<String>,
        exam_questions: Vec<ExamQuestion>,
        quiz: Vec<QuizQuestion>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            topic: topic.into(),
            raw_transcript: raw_transcript.into(),
            cleaned_transcript: cleaned_transcript.into(),
            summary: summary.into(),
            real_life_examples,
            exam_questions,
            quiz,
        }
    }
}

/// Scores a submitted quiz.
///
/// `answers` maps question id to the chosen option index. The score is the
/// count of questions whose chosen index equals the correct one; unanswered
/// questions never count as correct.
pub fn grade_quiz(quiz: &[QuizQuestion], answers: &HashMap<u32, usize>) -> usize {
    quiz.iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_answer))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_question(id: u32, correct_answer: usize) -> QuizQuestion {
        QuizQuestion {
            id,
            question: format!("Question {id}"),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer,
            explanation: "Because.".into(),
        }
    }

    #[test]
    fn test_grade_counts_only_matching_answers() {
        let quiz = vec![quiz_question(1, 0), quiz_question(2, 3), quiz_question(3, 1)];
        let answers = HashMap::from([(1, 0), (2, 2), (3, 1)]);
        assert_eq!(grade_quiz(&quiz, &answers), 2);
    }

    #[test]
    fn test_unanswered_question_never_counts() {
        let quiz = vec![quiz_question(1, 0), quiz_question(2, 1)];
        let answers = HashMap::from([(1, 0)]);
        assert_eq!(grade_quiz(&quiz, &answers), 1);
        assert_eq!(grade_quiz(&quiz, &HashMap::new()), 0);
    }

    #[test]
    fn test_answer_for_unknown_id_is_ignored() {
        let quiz = vec![quiz_question(1, 2)];
        let answers = HashMap::from([(99, 2)]);
        assert_eq!(grade_quiz(&quiz, &answers), 0);
    }

    #[test]
    fn test_quiz_question_well_formed() {
        assert!(quiz_question(1, 3).is_well_formed());
        assert!(!quiz_question(1, 4).is_well_formed());

        let mut short = quiz_question(1, 0);
        short.options.pop();
        assert!(!short.is_well_formed());
    }

    #[test]
    fn test_exam_question_marks_range() {
        let question = ExamQuestion {
            question: "Define inertia.".into(),
            marks: 1,
            question_type: QuestionType::VeryShort,
            answer_key: "Resistance to change in motion.".into(),
        };
        assert!(question.has_valid_marks());

        let out_of_range = ExamQuestion { marks: 6, ..question };
        assert!(!out_of_range.has_valid_marks());
    }

    #[test]
    fn test_question_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&QuestionType::VeryShort).unwrap(),
            "\"Very Short\""
        );
        assert_eq!(serde_json::to_string(&QuestionType::Long).unwrap(), "\"Long\"");
    }

    #[test]
    fn test_lesson_serializes_camel_case() {
        let lesson = Lesson::new("Topic", "raw", "clean", "summary", vec![], vec![], vec![]);
        let json = serde_json::to_value(&lesson).unwrap();
        assert!(json.get("cleanedTranscript").is_some());
        assert!(json.get("realLifeExamples").is_some());
        assert!(json.get("examQuestions").is_some());
    }
}
