//! OpenAI-compatible chat completions backend.

use super::{ChatBackend, ChatPrompt};
use crate::config::Settings;
use crate::error::{NotesError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Chat backend for any OpenAI-compatible endpoint (DeepSeek by default).
pub struct OpenAIChatBackend {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAIChatBackend {
    /// Create a backend from settings.
    ///
    /// Fails when the API key environment variable is missing.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.api_key()?;
        let client = create_client(&settings.generation, &api_key)?;

        Ok(Self {
            client,
            model: settings.generation.model.clone(),
            temperature: settings.generation.temperature,
        })
    }

    fn build_request(&self, prompt: ChatPrompt) -> Result<CreateChatCompletionRequest> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system)
                .build()
                .map_err(|e| NotesError::UpstreamGeneration(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.user)
                .build()
                .map_err(|e| NotesError::UpstreamGeneration(e.to_string()))?
                .into(),
        ];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages).stream(false);
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }

        args.build()
            .map_err(|e| NotesError::UpstreamGeneration(e.to_string()))
    }
}

#[async_trait]
impl ChatBackend for OpenAIChatBackend {
    #[instrument(skip(self, prompt), fields(model = %self.model, user_chars = prompt.user.len()))]
    async fn complete(&self, prompt: ChatPrompt) -> Result<String> {
        let request = self.build_request(prompt)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            NotesError::UpstreamGeneration(format!("Chat API error: {}", e))
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| NotesError::UpstreamGeneration("Empty response from model".to_string()))?;

        debug!("Received {} characters", content.len());
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> OpenAIChatBackend {
        let settings = Settings::default();
        OpenAIChatBackend {
            client: create_client(&settings.generation, "sk-test").unwrap(),
            model: settings.generation.model,
            temperature: None,
        }
    }

    #[test]
    fn test_request_is_non_streaming_with_two_messages() {
        let request = backend()
            .build_request(ChatPrompt::new("You are a helpful assistant", "hello"))
            .unwrap();

        assert_eq!(request.model, "deepseek-chat");
        assert_eq!(request.stream, Some(false));
        assert_eq!(request.messages.len(), 2);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are a helpful assistant");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_temperature_is_forwarded() {
        let mut backend = backend();
        backend.temperature = Some(0.2);
        let request = backend.build_request(ChatPrompt::new("s", "u")).unwrap();
        assert_eq!(request.temperature, Some(0.2));
    }
}
