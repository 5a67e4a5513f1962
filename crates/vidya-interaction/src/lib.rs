//! Remote-model integration: the Gemini REST client and its configuration.

pub mod config;
pub mod gemini_client;

pub use gemini_client::{DEFAULT_GEMINI_MODEL, GeminiClient};
