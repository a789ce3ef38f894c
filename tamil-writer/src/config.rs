//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `TAMIL_WRITER_CONFIG`
//! environment variable. A missing file is not an error; every field has a default.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `TAMIL_WRITER_` override YAML values
//! 3. **MISTRAL_API_KEY** - Special case: overrides `completion.api_key` if set
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `TAMIL_WRITER_COMPLETION__MODEL=open-mistral-nemo` sets the `completion.model` field.
//!
//! The API key is a secret. Keep it out of the YAML file in shared deployments and supply it
//! through `MISTRAL_API_KEY` instead; it is redacted from `Debug` output.
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Override server port
//! TAMIL_WRITER_PORT=8080
//!
//! # Credential for the completion endpoint
//! MISTRAL_API_KEY="..."
//!
//! # Run without a credential against the canned backend
//! TAMIL_WRITER_COMPLETION__PROVIDER=dummy
//!
//! # Longer timeout for slow networks
//! TAMIL_WRITER_COMPLETION__TIMEOUT=60s
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use url::Url;

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "TAMIL_WRITER_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Remote completion endpoint settings
    pub completion: CompletionConfig,
    /// Bounds for the requested length budget (max generated tokens)
    pub length: LengthConfig,
    /// Enable OpenTelemetry OTLP export for distributed tracing
    pub enable_otel_export: bool,
}

/// Which completion backend serves generation requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionProvider {
    /// Mistral chat-completions API (requires `api_key`)
    #[default]
    Mistral,
    /// Canned local text, no network access
    Dummy,
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
    pub provider: CompletionProvider,
    /// Full URL of the chat-completions endpoint
    pub url: Url,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer credential for the endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Whole-request timeout, including reading the body
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub temperature: f64,
    pub top_p: f64,
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("provider", &self.provider)
            .field("url", &self.url.as_str())
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .finish()
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: CompletionProvider::Mistral,
            url: Url::parse("https://api.mistral.ai/v1/chat/completions").expect("default completion URL is valid"),
            model: "open-mistral-7b".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Length budget bounds. `step` only drives the form slider; requests are checked against
/// `min..=max`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LengthConfig {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

impl Default for LengthConfig {
    fn default() -> Self {
        Self {
            min: 100,
            max: 500,
            step: 50,
            default: 250,
        }
    }
}

impl LengthConfig {
    pub fn contains(&self, length: u32) -> bool {
        (self.min..=self.max).contains(&length)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            completion: CompletionConfig::default(),
            length: LengthConfig::default(),
            enable_otel_export: false,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        let completion = &self.completion;
        if completion.provider == CompletionProvider::Mistral && completion.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(Error::Internal {
                operation: "Config validation: The mistral completion provider requires an API key. \
                     Please set the MISTRAL_API_KEY environment variable or completion.api_key in the config file."
                    .to_string(),
            });
        }

        if completion.timeout.is_zero() {
            return Err(Error::Internal {
                operation: "Config validation: completion.timeout must be greater than zero".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&completion.temperature) {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: completion.temperature ({}) must be between 0 and 2",
                    completion.temperature
                ),
            });
        }

        if !(completion.top_p > 0.0 && completion.top_p <= 1.0) {
            return Err(Error::Internal {
                operation: format!("Config validation: completion.top_p ({}) must be in (0, 1]", completion.top_p),
            });
        }

        let length = &self.length;
        if length.min == 0 || length.min > length.max {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: Invalid length configuration: min ({}) must be positive and not greater than max ({})",
                    length.min, length.max
                ),
            });
        }

        if !length.contains(length.default) {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: length.default ({}) must be between min ({}) and max ({})",
                    length.default, length.min, length.max
                ),
            });
        }

        if length.step == 0 {
            return Err(Error::Internal {
                operation: "Config validation: length.step must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can override specific values
            // (TAMIL_WRITER_CONFIG names the file itself and is not a field)
            .merge(Env::prefixed("TAMIL_WRITER_").ignore(&["config"]).split("__"))
            // Conventional credential variable
            .merge(Env::raw().only(&["MISTRAL_API_KEY"]).map(|_| "completion.api_key".into()))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
