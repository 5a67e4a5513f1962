//! `vidya transcribe` - one-off media transcription.

use anyhow::{Context, Result};
use std::path::Path;
use vidya_application::stages;
use vidya_interaction::GeminiClient;

use super::utils::guess_mime_type;

/// Transcribes one media file and prints the text to stdout.
pub async fn run(file: &Path, mime: Option<&str>) -> Result<()> {
    let client = GeminiClient::try_from_env().map_err(anyhow::Error::msg)?;

    let bytes = std::fs::read(file)
        .with_context(|| format!("failed to read media file {}", file.display()))?;
    let mime_type = mime.unwrap_or_else(|| guess_mime_type(file));

    tracing::info!(file = %file.display(), mime_type, "transcribing media");
    let text = stages::transcribe_media(&client, bytes, mime_type).await?;

    println!("{text}");
    Ok(())
}
