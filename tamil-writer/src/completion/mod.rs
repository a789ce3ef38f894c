//! Completion service abstraction
//!
//! This module defines the `CompletionService` trait, the single seam between the generation
//! pipeline and the remote text-generation endpoint. The production implementation talks to the
//! Mistral chat-completions API; a canned implementation exists for local development, and tests
//! substitute their own.

use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

use crate::{
    config::{CompletionConfig, CompletionProvider},
    prompt::Prompts,
};

pub mod dummy;
pub mod mistral;

/// Create a completion service from configuration
pub fn create_service(config: &CompletionConfig) -> anyhow::Result<Arc<dyn CompletionService>> {
    let service: Arc<dyn CompletionService> = match config.provider {
        CompletionProvider::Mistral => Arc::new(mistral::MistralClient::new(config)?),
        CompletionProvider::Dummy => {
            tracing::warn!("Using the canned dummy completion backend - no text will be generated");
            Arc::new(dummy::DummyCompletion::default())
        }
    };
    Ok(service)
}

/// Errors from a single completion attempt. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("could not reach the completion service: {0}")]
    Transport(String),

    #[error("completion service did not respond within {after:?}")]
    Timeout { after: Duration },

    #[error("completion service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response from completion service: {0}")]
    Malformed(String),
}

/// Remote text completion
///
/// Implementors issue at most one request per call and never cache results.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generate text for the given instructions, limited to `max_tokens` generated tokens.
    ///
    /// Returns the first completion's text with surrounding whitespace removed.
    async fn complete(&self, prompts: &Prompts, max_tokens: u32) -> Result<String, GenerationError>;
}
