//! Application view-state.
//!
//! The visible lesson set, notifications, and appointments live in one
//! explicit state struct with discrete transition functions; handlers receive
//! it by reference rather than through any global. Publishing a lesson and
//! booking an appointment also emit the cross-role notification for that
//! event, since the state layer is the sole notification producer for them.

use crate::appointment::Appointment;
use crate::lesson::Lesson;
use crate::notification::{Notification, NotificationKind};
use crate::role::Role;

/// Mutable state owned by the view layer.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Published lessons, newest first.
    pub lessons: Vec<Lesson>,
    /// The lesson currently open, if any.
    pub active_lesson_id: Option<String>,
    /// Live notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Booked doubt-session requests, oldest first.
    pub appointments: Vec<Appointment>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a lesson and notifies students.
    ///
    /// Returns the emitted notification so the caller can schedule its
    /// expiry.
    pub fn add_lesson(&mut self, lesson: Lesson) -> &Notification {
        let note = Notification::new(
            Role::Student,
            "New Lesson Added",
            format!("Teacher has published a new lesson: {}", lesson.topic),
            NotificationKind::Info,
        );
        self.lessons.insert(0, lesson);
        self.push_notification(note)
    }

    /// Selects a lesson for viewing. Returns false if the id is unknown.
    pub fn select_lesson(&mut self, id: &str) -> bool {
        if self.lessons.iter().any(|l| l.id == id) {
            self.active_lesson_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// The currently selected lesson, if any.
    pub fn active_lesson(&self) -> Option<&Lesson> {
        let id = self.active_lesson_id.as_deref()?;
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Records an appointment request and alerts the teacher.
    pub fn book_appointment(&mut self, appointment: Appointment) -> &Notification {
        let note = Notification::new(
            Role::Teacher,
            "New Doubt Session Request",
            format!(
                "{} requested a session on {}",
                appointment.student_name, appointment.topic
            ),
            NotificationKind::Alert,
        );
        self.appointments.push(appointment);
        self.push_notification(note)
    }

    /// Prepends a notification and returns a reference to it.
    pub fn push_notification(&mut self, notification: Notification) -> &Notification {
        self.notifications.insert(0, notification);
        &self.notifications[0]
    }

    /// Removes a notification. Returns false if the id is unknown.
    pub fn dismiss_notification(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    /// Marks a notification as read. Returns false if the id is unknown.
    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.read = true;
                true
            }
            None => false,
        }
    }

    /// Notifications addressed to one role, newest first.
    pub fn notifications_for(&self, role: Role) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.target_role == role)
            .collect()
    }
}
