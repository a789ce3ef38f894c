//! Mistral chat-completions client.
//!
//! Sends a two-message exchange (system, user) to the configured endpoint and extracts
//! `choices[0].message.content` from the response. Exactly one HTTP request is issued per call.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    completion::{CompletionService, GenerationError},
    config::CompletionConfig,
    prompt::Prompts,
};

/// Upper bound on how much of an error body is carried into the error message
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

pub struct MistralClient {
    client: Client,
    url: Url,
    model: String,
    api_key: String,
    temperature: f64,
    top_p: f64,
    timeout: Duration,
}

impl MistralClient {
    pub fn new(config: &CompletionConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("completion.api_key is required for the mistral provider"))?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            top_p: config.top_p,
            timeout: config.timeout,
        })
    }

    fn map_reqwest_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout { after: self.timeout }
        } else {
            // Alternate formatting walks the source chain (dns, connect, tls...)
            GenerationError::Transport(format!("{:#}", anyhow::Error::new(e)))
        }
    }
}

#[async_trait]
impl CompletionService for MistralClient {
    #[tracing::instrument(skip_all, fields(model = %self.model, max_tokens = max_tokens))]
    async fn complete(&self, prompts: &Prompts, max_tokens: u32) -> Result<String, GenerationError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompts.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompts.user,
                },
            ],
            temperature: self.temperature,
            max_tokens,
            top_p: self.top_p,
        };

        let start = Instant::now();
        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_reqwest_error(e))?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!(status = status.as_u16(), elapsed_ms, "Completion request rejected");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }
        info!(status = status.as_u16(), elapsed_ms, "Completion request finished");

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Malformed(format!("invalid JSON body: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Malformed("response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        let text = content.trim();
        if text.is_empty() {
            return Err(GenerationError::Malformed("first choice has no content".to_string()));
        }
        debug!(chars = text.chars().count(), "Extracted completion text");

        Ok(text.to_string())
    }
}
