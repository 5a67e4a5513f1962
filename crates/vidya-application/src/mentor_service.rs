//! Mentor Service
//!
//! One-shot text generators for the progress-mentor panel and the AI
//! notification toasts. Both swallow every failure into a fixed fallback
//! string; a degraded sentence of advice is fine, an error dialog is not.

use std::sync::Arc;
use vidya_core::analytics::{StudentProfile, StudentResult};
use vidya_core::model::{GenerateRequest, ModelClient};
use vidya_core::Role;

/// Shown when analysis fails outright.
const ANALYSIS_ERROR_FALLBACK: &str = "I'm having trouble analyzing the data right now.";
/// Shown when the model returns nothing to analyze with.
const ANALYSIS_EMPTY_FALLBACK: &str = "Unable to generate analysis at this time.";
/// Shown when notification generation fails or returns nothing.
const NOTIFICATION_FALLBACK: &str = "New update available.";

/// Performance records for one analysis request, with the role implied by
/// which view is asking.
pub enum ProgressData<'a> {
    /// A student's own quiz history.
    Student(&'a [StudentResult]),
    /// The teacher's class roster.
    Teacher(&'a [StudentProfile]),
}

impl ProgressData<'_> {
    /// The role whose view produced this data.
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Teacher(_) => Role::Teacher,
        }
    }
}

/// AI mentor: progress analysis and short notification texts.
pub struct MentorService {
    client: Arc<dyn ModelClient>,
}

impl MentorService {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Analyzes performance records and returns free-text advice.
    ///
    /// Never errors: serialization or model failures degrade to a fixed
    /// fallback sentence.
    pub async fn analyze_progress(&self, data: ProgressData<'_>) -> String {
        let prompt = match build_analysis_prompt(&data) {
            Some(prompt) => prompt,
            None => return ANALYSIS_ERROR_FALLBACK.to_string(),
        };

        tracing::info!(role = data.role().as_str(), "generating progress analysis");

        match self.client.generate(GenerateRequest::new(prompt)).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => ANALYSIS_EMPTY_FALLBACK.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "progress analysis failed, falling back");
                ANALYSIS_ERROR_FALLBACK.to_string()
            }
        }
    }

    /// Generates a short role-specific notification text (capped at 20 words
    /// by prompt instruction only).
    pub async fn notification_text(&self, context: &str, role: Role) -> String {
        let prompt = match role {
            Role::Student => format!(
                "You are a student mentor. Generate a short, motivating study tip or \
                 notification (max 20 words) based on this context: \"{context}\"."
            ),
            Role::Teacher => format!(
                "You are a teacher assistant. Generate a short professional alert \
                 (max 20 words) based on this context: \"{context}\"."
            ),
        };

        match self.client.generate(GenerateRequest::new(prompt)).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => NOTIFICATION_FALLBACK.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "notification text failed, falling back");
                NOTIFICATION_FALLBACK.to_string()
            }
        }
    }
}

fn build_analysis_prompt(data: &ProgressData<'_>) -> Option<String> {
    match data {
        ProgressData::Student(results) => {
            let data_string = serde_json::to_string(results).ok()?;
            Some(format!(
                "You are an AI Student Mentor. Analyze the following quiz history for a \
                 student: {data_string}.\n\
                 1. Identify the student's strong subjects and weak areas based on scores.\n\
                 2. Provide personalized, encouraging advice on what to focus on next.\n\
                 3. Suggest specific study strategies (e.g., \"Review Newton's laws again\").\n\
                 Keep the tone motivating and constructive. Output plain text."
            ))
        }
        ProgressData::Teacher(profiles) => {
            let data_string = serde_json::to_string(profiles).ok()?;
            Some(format!(
                "You are an AI Classroom Assistant for a teacher. Analyze the following class \
                 performance data: {data_string}.\n\
                 1. Identify students who are falling behind (low scores/attendance).\n\
                 2. Suggest topics that the whole class seems to struggle with.\n\
                 3. Recommend intervention strategies for the teacher.\n\
                 Keep the tone professional and actionable. Output plain text."
            ))
        }
    }
}
