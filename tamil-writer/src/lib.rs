//! # tamil-writer: Tamil poem and story generator
//!
//! `tamil-writer` is a small web service that writes Tamil poems and stories with a hosted
//! large-language model. A user picks a genre (poem or story) and one of five subgenres, enters a
//! title and a short description, and receives the generated text together with a standalone
//! HTML document to download.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). Each submission flows
//! through three stateless steps:
//!
//! 1. The **prompt builder** ([`prompt`]) turns the validated request into a system and a user
//!    instruction using one fixed template per genre.
//! 2. The **completion client** ([`completion`]) sends both instructions and the length budget to
//!    the chat-completions endpoint in a single request, with an explicit timeout and no retries.
//! 3. The **document renderer** ([`document`]) wraps the text, title, genre labels and a
//!    timestamp into a self-contained HTML file and derives its download filename.
//!
//! [`generation`] ties the steps together. The completion client sits behind the
//! [`completion::CompletionService`] trait so tests and local development can swap it out.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use tamil_writer::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = tamil_writer::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     tamil_writer::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config)?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod completion;
pub mod config;
pub mod document;
pub mod errors;
pub mod generation;
pub mod prompt;
pub mod telemetry;
mod templates;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use axum::{
    Router,
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::{api::openapi::ApiDoc, completion::CompletionService};

/// Application state shared across all request handlers.
///
/// Everything here is read-only; requests never share mutable state.
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub completion: Arc<dyn CompletionService>,
}

/// Build the application router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/", get(api::handlers::pages::index))
        .route("/generate", post(api::handlers::pages::submit))
        .route("/api/v1/generations", post(api::handlers::generations::create_generation))
        .with_state(state)
        .merge(Scalar::with_url("/api/docs", ApiDoc::openapi()));

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create a new application with the completion backend named in the configuration
    pub fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting tamil-writer with configuration: {:#?}", config);
        let completion = completion::create_service(&config.completion)?;
        Ok(Self::with_service(config, completion))
    }

    /// Create an application around an existing completion service
    pub fn with_service(config: Config, completion: Arc<dyn CompletionService>) -> Self {
        let state = AppState::builder().config(config.clone()).completion(completion).build();
        Self {
            router: build_router(state),
            config,
        }
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "tamil-writer listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::test_utils::{RecordingCompletion, create_test_app, create_test_config};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_healthz() {
        let server = create_test_app(Arc::new(RecordingCompletion::new("unused")));

        let response = server.get("/healthz").await;

        assert_eq!(response.status_code().as_u16(), 200);
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_api_docs_are_served() {
        let server = create_test_app(Arc::new(RecordingCompletion::new("unused")));

        let response = server.get("/api/docs").await;

        response.assert_status_ok();
        assert!(response.text().contains("/api/v1/generations"));
    }

    #[test]
    fn test_new_uses_configured_backend() {
        // The test config selects the dummy backend, which needs no credential
        assert!(super::Application::new(create_test_config()).is_ok());
    }

    #[test]
    fn test_new_fails_without_credential_for_mistral() {
        crate::test_utils::install_crypto_provider();
        let mut config = create_test_config();
        config.completion.provider = crate::config::CompletionProvider::Mistral;
        config.completion.api_key = None;

        assert!(super::Application::new(config).is_err());
    }
}
