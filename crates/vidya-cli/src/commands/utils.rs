//! Shared command helpers.

use std::path::Path;

/// Guesses a MIME type from a media file extension.
pub fn guess_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mp3",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(&PathBuf::from("lecture.MP4")), "video/mp4");
        assert_eq!(guess_mime_type(&PathBuf::from("audio.wav")), "audio/wav");
        assert_eq!(
            guess_mime_type(&PathBuf::from("unknown.bin")),
            "application/octet-stream"
        );
    }
}
