//! Ephemeral notification records.
//!
//! Notifications are a side channel: produced on pipeline completion, quiz
//! submission, appointment booking, and by the AI mentor; auto-expired after
//! a display window or dismissed explicitly. Never persisted.

use crate::role::Role;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual/semantic category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Alert,
    Success,
    Ai,
}

/// One toast-style notification addressed to a single role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier (UUID format).
    pub id: String,
    pub target_role: Role,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    /// Timestamp when the notification was created (ISO 8601 format).
    pub timestamp: String,
    pub read: bool,
}

impl Notification {
    /// Creates an unread notification timestamped now, with a fresh UUID.
    pub fn new(
        target_role: Role,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            target_role,
            title: title.into(),
            message: message.into(),
            kind,
            timestamp: Utc::now().to_rfc3339(),
            read: false,
        }
    }
}
