use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tubenotes::generation::{ChatBackend, ChatPrompt};
use tubenotes::{NotesError, Result};

#[derive(Clone)]
pub struct MockBackend {
    pub reply: String,
    pub calls: Arc<Mutex<Vec<ChatPrompt>>>,
    pub fail_with: Option<String>,
}

impl MockBackend {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            reply: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn complete(&self, prompt: ChatPrompt) -> Result<String> {
        self.calls.lock().unwrap().push(prompt);
        if let Some(ref msg) = self.fail_with {
            return Err(NotesError::UpstreamGeneration(msg.clone()));
        }
        Ok(self.reply.clone())
    }

    fn model(&self) -> &str {
        "mock-chat"
    }
}
