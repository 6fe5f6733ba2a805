//! Chat-style text generation.

mod openai;

pub use openai::OpenAIChatBackend;

use crate::error::Result;
use async_trait::async_trait;

/// A single-turn chat request: one system and one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

impl ChatPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Trait for text-generation endpoints.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one non-streaming request and return the first completion's text.
    async fn complete(&self, prompt: ChatPrompt) -> Result<String>;

    /// Model identifier used for requests.
    fn model(&self) -> &str;
}
