//! Performance records consumed by progress analysis.

use serde::{Deserialize, Serialize};

/// One completed quiz attempt in a student's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResult {
    pub lesson_id: String,
    pub lesson_topic: String,
    pub score: u32,
    pub total_questions: u32,
    pub date: String,
}

/// A student's roster entry as seen by the teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: String,
    pub name: String,
    /// University seat number.
    pub usn: String,
    pub average_score: f32,
    pub lessons_completed: u32,
    /// Attendance percentage.
    pub attendance: u32,
    pub quiz_history: Vec<StudentResult>,
}
