//! Doubt-clearing session bookings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a booked session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
}

/// A student's request for a doubt-clearing session with the teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique appointment identifier (UUID format).
    pub id: String,
    pub student_name: String,
    /// What the student wants to discuss.
    pub topic: String,
    pub time_slot: String,
    pub date: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Creates a pending appointment with a fresh UUID.
    pub fn new(
        student_name: impl Into<String>,
        topic: impl Into<String>,
        time_slot: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            student_name: student_name.into(),
            topic: topic.into(),
            time_slot: time_slot.into(),
            date: date.into(),
            status: AppointmentStatus::Pending,
        }
    }
}
