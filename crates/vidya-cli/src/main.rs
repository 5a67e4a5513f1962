use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "vidya")]
#[command(about = "Vidya CLI - AI lesson studio", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lesson generation
    Lesson {
        #[command(subcommand)]
        action: LessonAction,
    },
    /// Transcribe a media file to plain text
    Transcribe {
        /// Path to the audio/video file
        file: PathBuf,
        /// MIME type; inferred from the file extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },
}

#[derive(Subcommand)]
enum LessonAction {
    /// Run the generation pipeline and print the lesson as JSON
    Create {
        /// Lesson topic
        #[arg(long)]
        topic: String,
        /// Path to the transcript text file
        #[arg(long)]
        transcript: PathBuf,
        /// Media files to transcribe and append to the transcript
        #[arg(long)]
        media: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lesson { action } => match action {
            LessonAction::Create {
                topic,
                transcript,
                media,
            } => commands::lesson::create(&topic, &transcript, &media).await?,
        },
        Commands::Transcribe { file, mime } => {
            commands::transcribe::run(&file, mime.as_deref()).await?;
        }
    }

    Ok(())
}
