//! Dummy completion backend
//!
//! Returns a fixed Tamil verse without any network traffic. Selected with
//! `completion.provider: dummy` for working on the pages without an API key.

use async_trait::async_trait;

use crate::{
    completion::{CompletionService, GenerationError},
    prompt::Prompts,
};

const CANNED_TEXT: &str = "அலைகள் பாடும் கடலின் ஓரம்\nநிலவு தூவும் வெள்ளி நூலே\nமணலில் எழுதிய கனவுகள் எல்லாம்\nகாற்றில் கலந்து கவிதை ஆகும்";

pub struct DummyCompletion {
    text: String,
}

impl DummyCompletion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for DummyCompletion {
    fn default() -> Self {
        Self::new(CANNED_TEXT)
    }
}

#[async_trait]
impl CompletionService for DummyCompletion {
    async fn complete(&self, prompts: &Prompts, max_tokens: u32) -> Result<String, GenerationError> {
        tracing::debug!(max_tokens, system_len = prompts.system.len(), "Dummy backend returning canned text");
        Ok(self.text.trim().to_string())
    }
}
