//! YouTube video identifiers.

use crate::error::{NotesError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `v=` or a path separator followed by exactly 11 id characters.
static VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("Invalid regex"));

/// An 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Thumbnail image for the video.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.0)
    }

    /// Canonical watch page for the video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video ID from a YouTube URL.
///
/// This is the only validation applied to user-supplied links: the first
/// `v=XXXXXXXXXXX` or `/XXXXXXXXXXX` occurrence wins and nothing else about
/// the URL (scheme, host, extra parameters) is inspected.
pub fn extract_video_id(url: &str) -> Result<VideoId> {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
        .ok_or_else(|| NotesError::InvalidUrlFormat {
            input: url.to_string(),
        })
}
