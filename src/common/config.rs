//! Configuration for the summarization pipeline.
//!
//! Defaults mirror the application constants; `AppConfig::from_env` overlays
//! the few values that differ per deployment.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::common::errors::{TldrError, TldrResult};

/// Sampling temperature sent with every generation.
pub const PROMPT_TEMPERATURE: f32 = 0.8;
/// Longest response requested from the generation service.
pub const MAX_WORDS: u32 = 400;
/// Fraction of the input word count used as the prompt token budget.
pub const REDUCTION_FACTOR: f64 = 0.10;
/// Floor of the prompt token budget.
pub const MIN_N_TOKENS: u32 = 400;
/// Label substituted into the prompt template.
pub const DEFAULT_INPUT_TYPE: &str = "technical text";

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
/// Default model name.
pub const DEFAULT_MODEL: &str = "mistral:7b-instruct-q8_0";
/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

const OLLAMA_URL_ENV: &str = "TLDR_OLLAMA_URL";
const MODEL_ENV: &str = "TLDR_MODEL";
const API_KEY_ENV: &str = "TLDR_API_KEY";
const PORT_ENV: &str = "TLDR_PORT";

/// Top-level configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation service connection settings.
    pub ollama: OllamaConfig,
    /// Per-request generation settings.
    pub generation: GenerationConfig,
    /// Prompt construction settings.
    pub prompt: PromptConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

impl AppConfig {
    /// Build the default configuration overlaid with `TLDR_*` environment variables.
    ///
    /// # Errors
    /// Returns an error if `TLDR_PORT` is set but not a valid port.
    pub fn from_env() -> TldrResult<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var(OLLAMA_URL_ENV) {
            config.ollama.base_url = base_url;
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            config.ollama.model = model;
        }
        config.ollama.api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if let Ok(port) = std::env::var(PORT_ENV) {
            config.server.port = port
                .parse()
                .map_err(|_| TldrError::InvalidConfig(format!("{PORT_ENV} is not a port: {port}")))?;
        }

        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> TldrResult<()> {
        if self.ollama.model.trim().is_empty() {
            return Err(TldrError::InvalidConfig(
                "ollama.model must not be empty".to_string(),
            ));
        }

        if self.generation.max_words == 0 {
            return Err(TldrError::InvalidConfig(
                "generation.max_words must be > 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(TldrError::InvalidConfig(
                "generation.temperature must be within [0, 2]".to_string(),
            ));
        }

        if self.prompt.min_tokens == 0 {
            return Err(TldrError::InvalidConfig(
                "prompt.min_tokens must be > 0".to_string(),
            ));
        }

        if self.prompt.reduction_factor.is_nan() || self.prompt.reduction_factor <= 0.0 {
            return Err(TldrError::InvalidConfig(
                "prompt.reduction_factor must be > 0".to_string(),
            ));
        }

        Url::parse(&self.ollama.base_url)?;

        Ok(())
    }
}

/// Connection settings for the Ollama-compatible generation service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL, e.g. `http://127.0.0.1:11434`.
    pub base_url: String,
    /// Model name as installed on the service.
    pub model: String,
    /// Optional API key sent as a bearer token to hosted endpoints.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// How long the service keeps the model loaded after a request.
    pub keep_alive: String,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl OllamaConfig {
    /// Connection timeout as a `Duration`.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            keep_alive: "5m".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 120,
        }
    }
}

/// Settings sent with every generation request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Longest response to request.
    pub max_words: u32,
    /// Sampling temperature; 0 means no variety, 1 means lots of variety.
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_words: MAX_WORDS,
            temperature: PROMPT_TEMPERATURE,
        }
    }
}

/// Prompt construction settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Fraction of the input word count used as token budget.
    pub reduction_factor: f64,
    /// Minimum token budget.
    pub min_tokens: u32,
    /// Label describing the kind of input text.
    pub input_type: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            reduction_factor: REDUCTION_FACTOR,
            min_tokens: MIN_N_TOKENS,
            input_type: DEFAULT_INPUT_TYPE.to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}
