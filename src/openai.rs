//! OpenAI-compatible client configuration.

use crate::config::GenerationSettings;
use crate::error::{NotesError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a client for the configured OpenAI-compatible endpoint.
pub fn create_client(settings: &GenerationSettings, api_key: &str) -> Result<Client<OpenAIConfig>> {
    create_client_with_timeout(settings, api_key, Duration::from_secs(settings.timeout_secs))
}

/// Create a client with a custom timeout.
pub fn create_client_with_timeout(
    settings: &GenerationSettings,
    api_key: &str,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = http_client(timeout)?;

    let config = OpenAIConfig::new()
        .with_api_base(settings.api_base.trim_end_matches('/'))
        .with_api_key(api_key);

    Ok(Client::with_config(config).with_http_client(http_client))
}

/// HTTP client for generation calls.
///
/// Environment proxies are ignored; the egress proxy only carries transcript
/// requests.
fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .map_err(|e| NotesError::Config(format!("Failed to create HTTP client: {}", e)))
}
