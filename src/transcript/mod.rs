//! Transcript retrieval.
//!
//! Provides a trait-based interface over caption sources so the pipeline can
//! be driven by the live YouTube fetcher or by a stub in tests.

pub mod proxy;
mod youtube;

pub use proxy::{ProxyPool, ProxyRoute};
pub use youtube::YoutubeTranscriptFetcher;

use crate::error::{NotesError, Result};
use crate::video::VideoId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A timestamped span of spoken text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// The full spoken text of a video as a single string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    /// Join segment texts with single spaces, in source order.
    pub fn from_segments(segments: &[TranscriptSegment]) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when there is no spoken text at all.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the ordered caption segments for a video.
    async fn fetch_segments(&self, video_id: &VideoId) -> Result<Vec<TranscriptSegment>>;
}

/// Fetch a video's segments and join them into a transcript.
///
/// A track without any text counts as no transcript.
pub async fn fetch_transcript(
    fetcher: &dyn TranscriptFetcher,
    video_id: &VideoId,
) -> Result<Transcript> {
    let segments = fetcher.fetch_segments(video_id).await?;
    let transcript = Transcript::from_segments(&segments);
    if transcript.is_empty() {
        warn!("Caption track for {} contained no text", video_id);
        return Err(NotesError::NoTranscriptFound {
            video_id: video_id.to_string(),
        });
    }
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_preserves_order() {
        let segments = vec![
            TranscriptSegment::new("never gonna", 0.0, 1.5),
            TranscriptSegment::new("give you up", 1.5, 2.0),
            TranscriptSegment::new("never gonna let you down", 3.5, 2.5),
        ];

        let transcript = Transcript::from_segments(&segments);
        assert_eq!(
            transcript.as_str(),
            "never gonna give you up never gonna let you down"
        );
        assert_eq!(transcript.word_count(), 10);
    }

    #[test]
    fn test_join_is_stable_under_rejoin() {
        let segments = vec![
            TranscriptSegment::new("a", 0.0, 1.0),
            TranscriptSegment::new("b c", 1.0, 1.0),
        ];
        let once = Transcript::from_segments(&segments);
        let again = Transcript::from_segments(&[TranscriptSegment::new(once.as_str(), 0.0, 2.0)]);
        assert_eq!(once, again);
    }

    #[test]
    fn test_single_and_empty() {
        let single = Transcript::from_segments(&[TranscriptSegment::new("hello", 0.0, 1.0)]);
        assert_eq!(single.as_str(), "hello");
        assert!(Transcript::from_segments(&[]).is_empty());
        assert!(Transcript::from_segments(&[TranscriptSegment::new(" ", 0.0, 1.0)]).is_empty());
    }

    struct FixedFetcher(Vec<TranscriptSegment>);

    #[async_trait]
    impl TranscriptFetcher for FixedFetcher {
        async fn fetch_segments(&self, _video_id: &VideoId) -> Result<Vec<TranscriptSegment>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_blank_track_is_no_transcript() {
        let video_id = crate::video::extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();

        let fetcher = FixedFetcher(vec![TranscriptSegment::new("", 0.0, 1.0)]);
        let err = fetch_transcript(&fetcher, &video_id).await.unwrap_err();
        assert_eq!(err.to_string(), "No transcript found for this video.");

        let fetcher = FixedFetcher(vec![TranscriptSegment::new("hi", 0.0, 1.0)]);
        let transcript = fetch_transcript(&fetcher, &video_id).await.unwrap();
        assert_eq!(transcript.as_str(), "hi");
    }
}
