pub mod lesson;
pub mod transcribe;
pub mod utils;
