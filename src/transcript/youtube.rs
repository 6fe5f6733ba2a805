//! YouTube caption fetcher backed by `yt-transcript-rs`.
//!
//! Each fetch builds its own API instance so that every request leaves
//! through a freshly picked proxy route.

use super::proxy::{ProxyPool, ProxyRoute};
use super::{TranscriptFetcher, TranscriptSegment};
use crate::config::Settings;
use crate::error::{NotesError, Result};
use crate::video::VideoId;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};
use yt_transcript_rs::proxies::GenericProxyConfig;
use yt_transcript_rs::YouTubeTranscriptApi;

/// Fetches caption transcripts from YouTube.
pub struct YoutubeTranscriptFetcher {
    proxies: ProxyPool,
    languages: Vec<String>,
    timeout: Duration,
}

impl YoutubeTranscriptFetcher {
    /// Create a fetcher with the given proxy pool and language preference.
    pub fn new(proxies: ProxyPool, languages: Vec<String>, timeout: Duration) -> Self {
        if proxies.is_empty() {
            debug!("Transcript requests connect directly");
        } else {
            debug!("Transcript requests rotate across {} proxy routes", proxies.len());
        }

        Self {
            proxies,
            languages,
            timeout,
        }
    }

    /// Create a fetcher from application settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let proxies = ProxyPool::from_settings(&settings.proxy)?;
        Ok(Self::new(
            proxies,
            settings.transcript.languages.clone(),
            Duration::from_secs(settings.transcript.timeout_secs),
        ))
    }

    /// Build an API instance routed through a freshly picked proxy.
    fn api(&self) -> Result<YouTubeTranscriptApi> {
        let route = self.proxies.pick(&mut rand::thread_rng())?;
        let client = self.http_client(route.as_ref())?;

        let proxy_config = match route {
            Some(route) => {
                debug!("Routing transcript request through proxy");
                Some(proxy_config(route)?)
            }
            None => None,
        };

        YouTubeTranscriptApi::new(
            None,
            proxy_config.map(|config| Box::new(config) as _),
            Some(client),
        )
        .map_err(|e| NotesError::UnknownFetch(format!("Failed to create transcript client: {}", e)))
    }

    /// HTTP client for one fetch.
    ///
    /// Environment proxies are ignored so that a direct route really is direct.
    fn http_client(&self, route: Option<&ProxyRoute>) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .no_proxy()
            .cookie_store(true)
            .timeout(self.timeout)
            .default_headers(default_headers());

        if let Some(route) = route {
            builder = with_route(builder, route)?;
        }

        builder
            .build()
            .map_err(|e| NotesError::UnknownFetch(format!("Failed to create HTTP client: {}", e)))
    }

    /// Configured languages, or English when none are set.
    fn language_preference(&self) -> Vec<&str> {
        if self.languages.is_empty() {
            vec!["en"]
        } else {
            self.languages.iter().map(String::as_str).collect()
        }
    }
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn fetch_segments(&self, video_id: &VideoId) -> Result<Vec<TranscriptSegment>> {
        let api = self.api()?;
        let languages = self.language_preference();

        let fetched = api
            .fetch_transcript(video_id.as_str(), &languages, false)
            .await
            .map_err(|e| classify(video_id, e))?;

        info!(
            "Using {} caption track ({}, {} snippets)",
            fetched.language_code,
            if fetched.is_generated { "auto-generated" } else { "manual" },
            fetched.snippets.len()
        );

        Ok(fetched
            .snippets
            .into_iter()
            .map(|s| TranscriptSegment::new(s.text, s.start, s.duration))
            .collect())
    }
}

fn default_headers() -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        reqwest::header::HeaderValue::from_static("en-US"),
    );
    headers
}

fn with_route(
    builder: reqwest::ClientBuilder,
    route: &ProxyRoute,
) -> Result<reqwest::ClientBuilder> {
    let http = reqwest::Proxy::http(&route.http)
        .map_err(|e| NotesError::Config(format!("Invalid proxy URL: {}", e)))?;
    let https = reqwest::Proxy::https(&route.https)
        .map_err(|e| NotesError::Config(format!("Invalid proxy URL: {}", e)))?;
    Ok(builder.proxy(http).proxy(https))
}

fn proxy_config(route: ProxyRoute) -> Result<GenericProxyConfig> {
    GenericProxyConfig::new(Some(route.http), Some(route.https))
        .map_err(|e| NotesError::Config(format!("Invalid proxy URL: {}", e)))
}

/// Map a retrieval failure onto the transcript error taxonomy.
fn classify(video_id: &VideoId, err: CouldNotRetrieveTranscript) -> NotesError {
    match &err.reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled { .. }) => {
            NotesError::TranscriptsDisabled {
                video_id: video_id.to_string(),
            }
        }
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
            NotesError::NoTranscriptFound {
                video_id: video_id.to_string(),
            }
        }
        Some(CouldNotRetrieveTranscriptReason::IpBlocked { .. })
        | Some(CouldNotRetrieveTranscriptReason::RequestBlocked { .. }) => {
            NotesError::UpstreamBlocked(err.to_string())
        }
        _ => NotesError::UnknownFetch(err.to_string()),
    }
}
