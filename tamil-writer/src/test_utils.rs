//! Test doubles and constructors shared by unit and HTTP tests.

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::{Arc, Mutex};

use crate::{
    completion::{CompletionService, GenerationError},
    config::{CompletionProvider, Config},
    prompt::Prompts,
};

/// reqwest is built without a default rustls provider; install one once per test binary
pub fn install_crypto_provider() {
    // Err only means another test got there first
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

/// Returns fixed text and records every call it receives
pub struct RecordingCompletion {
    text: String,
    calls: Mutex<Vec<(Prompts, u32)>>,
}

impl RecordingCompletion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Prompts, u32)> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

#[async_trait]
impl CompletionService for RecordingCompletion {
    async fn complete(&self, prompts: &Prompts, max_tokens: u32) -> Result<String, GenerationError> {
        self.calls.lock().expect("calls lock poisoned").push((prompts.clone(), max_tokens));
        Ok(self.text.clone())
    }
}

/// Always fails with the given error
pub struct FailingCompletion(pub GenerationError);

#[async_trait]
impl CompletionService for FailingCompletion {
    async fn complete(&self, _prompts: &Prompts, _max_tokens: u32) -> Result<String, GenerationError> {
        Err(self.0.clone())
    }
}

pub fn create_test_config() -> Config {
    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    };
    config.completion.provider = CompletionProvider::Dummy;
    config
}

pub fn create_test_app(service: Arc<dyn CompletionService>) -> TestServer {
    crate::Application::with_service(create_test_config(), service).into_test_server()
}
