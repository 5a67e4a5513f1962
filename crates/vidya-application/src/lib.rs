//! Application layer: the lesson-generation pipeline and the model-backed
//! services built on it (tutor chat, mentor analysis, notification expiry).

pub mod expiry;
pub mod lesson_pipeline;
pub mod mentor_service;
pub mod stages;
pub mod tutor_session;

pub use expiry::ExpiryScheduler;
pub use lesson_pipeline::LessonPipeline;
pub use mentor_service::{MentorService, ProgressData};
pub use tutor_session::TutorSession;
