//! Pipeline orchestrator for tubenotes.
//!
//! Coordinates the steps from a video link to notes, and from notes to
//! answers.

use crate::config::{Prompts, Settings};
use crate::error::{NotesError, Result};
use crate::generation::{ChatBackend, ChatPrompt, OpenAIChatBackend};
use crate::transcript::{self, Transcript, TranscriptFetcher, YoutubeTranscriptFetcher};
use crate::video::{extract_video_id, VideoId};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Model-generated condensed text derived from a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Summary(String);

impl Summary {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Notes produced for one video.
#[derive(Debug, Clone, Serialize)]
pub struct Notes {
    pub video_id: VideoId,
    pub summary: Summary,
}

/// What can be shown about a link before any network call.
#[derive(Debug, Clone, Serialize)]
pub struct VideoPreview {
    pub video_id: VideoId,
    pub thumbnail_url: String,
    pub watch_url: String,
}

/// Reject empty or whitespace-only questions.
pub fn validate_question(question: &str) -> Result<&str> {
    if question.trim().is_empty() {
        return Err(NotesError::EmptyQuestion);
    }
    Ok(question)
}

/// The main orchestrator for the tubenotes pipeline.
///
/// Holds only stateless collaborators, so one instance can serve any number
/// of sessions.
pub struct Orchestrator {
    fetcher: Arc<dyn TranscriptFetcher>,
    backend: Arc<dyn ChatBackend>,
    prompts: Prompts,
    max_words: u32,
}

impl Orchestrator {
    /// Create an orchestrator with the live YouTube fetcher and chat backend.
    ///
    /// Fails on missing credentials or invalid proxy settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let fetcher = Arc::new(YoutubeTranscriptFetcher::from_settings(settings)?);
        let backend = Arc::new(OpenAIChatBackend::from_settings(settings)?);
        info!(
            "Using model {} at {}",
            settings.generation.model, settings.generation.api_base
        );

        Ok(Self::with_components(fetcher, backend, prompts).with_max_words(settings.notes.max_words))
    }

    /// Create an orchestrator from explicit collaborators.
    pub fn with_components(
        fetcher: Arc<dyn TranscriptFetcher>,
        backend: Arc<dyn ChatBackend>,
        prompts: Prompts,
    ) -> Self {
        Self {
            fetcher,
            backend,
            prompts,
            max_words: 250,
        }
    }

    /// Set the word limit requested in the notes prompt.
    pub fn with_max_words(mut self, max_words: u32) -> Self {
        self.max_words = max_words;
        self
    }

    /// Model used for generation.
    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Resolve a link into its video ID and thumbnail.
    pub fn preview(&self, url: &str) -> Result<VideoPreview> {
        let video_id = extract_video_id(url)?;
        Ok(VideoPreview {
            thumbnail_url: video_id.thumbnail_url(),
            watch_url: video_id.watch_url(),
            video_id,
        })
    }

    /// Fetch a video's transcript.
    pub async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript> {
        transcript::fetch_transcript(self.fetcher.as_ref(), video_id).await
    }

    /// Summarize a transcript.
    ///
    /// The transcript is sent as-is; inputs beyond the model's context limit
    /// fail upstream.
    #[instrument(skip(self, transcript), fields(words = transcript.word_count()))]
    pub async fn summarize(&self, transcript: &Transcript) -> Result<Summary> {
        let mut vars = HashMap::new();
        vars.insert("max_words".to_string(), self.max_words.to_string());

        let mut user = self
            .prompts
            .render_with_custom(&self.prompts.notes.instruction, &vars);
        user.push_str(transcript.as_str());

        let prompt = ChatPrompt::new(self.prompts.notes.system.clone(), user);
        let text = self.backend.complete(prompt).await?;

        debug!("Summary has {} words", text.split_whitespace().count());
        Ok(Summary(text))
    }

    /// Answer a question about a summary.
    #[instrument(skip(self, summary))]
    pub async fn answer(&self, summary: &Summary, question: &str) -> Result<String> {
        let question = validate_question(question)?;

        let mut vars = HashMap::new();
        vars.insert("summary".to_string(), summary.as_str().to_string());
        vars.insert("question".to_string(), question.to_string());

        let user = self.prompts.render_with_custom(&self.prompts.qa.user, &vars);
        let prompt = ChatPrompt::new(self.prompts.qa.system.clone(), user);

        self.backend.complete(prompt).await
    }

    /// Run the full link-to-notes pipeline.
    #[instrument(skip(self))]
    pub async fn generate_notes(&self, url: &str) -> Result<Notes> {
        let video_id = extract_video_id(url)?;

        let transcript = self.fetch_transcript(&video_id).await?;
        info!(
            "Fetched transcript for {} ({} words)",
            video_id,
            transcript.word_count()
        );

        let summary = self.summarize(&transcript).await?;
        Ok(Notes { video_id, summary })
    }
}
