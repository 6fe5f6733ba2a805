use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tubenotes::transcript::{TranscriptFetcher, TranscriptSegment};
use tubenotes::video::VideoId;
use tubenotes::{NotesError, Result};

#[derive(Clone)]
pub struct MockFetcher {
    pub segments: Vec<TranscriptSegment>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<fn(&VideoId) -> NotesError>,
}

impl MockFetcher {
    pub fn new(text: &str) -> Self {
        let segments = text
            .split(". ")
            .enumerate()
            .map(|(i, line)| TranscriptSegment::new(line, i as f64 * 2.0, 2.0))
            .collect();
        Self {
            segments,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(fail_with: fn(&VideoId) -> NotesError) -> Self {
        Self {
            segments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(fail_with),
        }
    }
}

#[async_trait]
impl TranscriptFetcher for MockFetcher {
    async fn fetch_segments(&self, video_id: &VideoId) -> Result<Vec<TranscriptSegment>> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(fail_with) = self.fail_with {
            return Err(fail_with(video_id));
        }
        Ok(self.segments.clone())
    }
}

/// A fetcher whose requests never complete.
pub struct StalledFetcher;

#[async_trait]
impl TranscriptFetcher for StalledFetcher {
    async fn fetch_segments(&self, _video_id: &VideoId) -> Result<Vec<TranscriptSegment>> {
        std::future::pending().await
    }
}
