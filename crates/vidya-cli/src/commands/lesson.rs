//! `vidya lesson create` - run the full generation pipeline.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vidya_application::{LessonPipeline, stages};
use vidya_core::model::ModelClient;
use vidya_interaction::GeminiClient;

use super::utils::guess_mime_type;

/// Reads the transcript (transcribing any media files first), runs the
/// pipeline, and prints the resulting lesson as pretty JSON.
pub async fn create(topic: &str, transcript_path: &Path, media: &[PathBuf]) -> Result<()> {
    let client: Arc<dyn ModelClient> =
        Arc::new(GeminiClient::try_from_env().map_err(anyhow::Error::msg)?);

    let mut raw_transcript = std::fs::read_to_string(transcript_path)
        .with_context(|| format!("failed to read transcript {}", transcript_path.display()))?;

    // Transcription is a retryable pre-stage: it completes (or fails) before
    // the atomic pipeline ever starts.
    for path in media {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read media file {}", path.display()))?;
        let mime_type = guess_mime_type(path);
        tracing::info!(file = %path.display(), mime_type, "transcribing media");
        let text = stages::transcribe_media(client.as_ref(), bytes, mime_type)
            .await
            .with_context(|| format!("transcription failed for {}", path.display()))?;
        raw_transcript.push('\n');
        raw_transcript.push_str(&text);
    }

    let pipeline = LessonPipeline::new(client);
    let lesson = pipeline.run(topic, &raw_transcript).await?;

    println!("{}", serde_json::to_string_pretty(&lesson)?);
    Ok(())
}
