//! Error types for tubenotes.

use thiserror::Error;
use uuid::Uuid;

/// Library-level error type for tubenotes operations.
#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Invalid YouTube URL format. Could not extract video ID.")]
    InvalidUrlFormat { input: String },

    #[error("Subtitles are disabled for this video.")]
    TranscriptsDisabled { video_id: String },

    #[error("No transcript found for this video.")]
    NoTranscriptFound { video_id: String },

    #[error("YouTube is blocking transcript requests from this address: {0}")]
    UpstreamBlocked(String),

    #[error("Failed to fetch transcript: {0}")]
    UnknownFetch(String),

    #[error("Text generation failed: {0}")]
    UpstreamGeneration(String),

    #[error("Please enter a valid question before submitting.")]
    EmptyQuestion,

    #[error("Generate notes for a video before asking questions.")]
    NoSummary,

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl NotesError {
    /// Whether this is a user-facing condition whose message is shown as-is,
    /// rather than an unexpected failure.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            NotesError::InvalidUrlFormat { .. }
                | NotesError::TranscriptsDisabled { .. }
                | NotesError::NoTranscriptFound { .. }
                | NotesError::EmptyQuestion
                | NotesError::NoSummary
        )
    }
}

/// Result type alias for tubenotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;
