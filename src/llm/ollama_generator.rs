//! Blocking generation service backed by an Ollama-compatible `/api/generate` endpoint.
//!
//! Behaviour:
//! - `submit` posts a non-streaming generate request and returns once headers arrive.
//! - `wait` checks the status and decodes the body into a [`GenerationResult`].
//! - Hosted endpoints get the configured API key as a bearer token.

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::config::{GenerationConfig, OllamaConfig};
use crate::common::errors::{TldrError, TldrResult};
use crate::llm::generation::{GenerationResult, GenerationService};

/// Warm-up prompt: minimal non-empty prompt.
const WARMUP_PROMPT: &str = " ";
/// Warm-up token budget.
const WARMUP_NUM_PREDICT: u32 = 1;
/// Keep-alive value that makes the service unload the model immediately.
const UNLOAD_KEEP_ALIVE: &str = "0";

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'a str>,
    stream: bool,
    keep_alive: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl From<GenerateResponse> for GenerationResult {
    fn from(value: GenerateResponse) -> Self {
        Self {
            generated_text: value.response,
        }
    }
}

/// Pending `/api/generate` call.
#[derive(Debug)]
pub struct OllamaHandle {
    response: Response,
}

/// Blocking Ollama client implementing [`GenerationService`].
#[derive(Clone, Debug)]
pub struct OllamaGenerator {
    client: Client,
    config: OllamaConfig,
}

impl OllamaGenerator {
    /// Create a client from connection settings.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &OllamaConfig) -> TldrResult<Self> {
        url::Url::parse(&config.base_url)?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Model name requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Whether the service answers `GET /api/version`.
    ///
    /// # Errors
    /// Returns an error if the service cannot be reached at all.
    pub fn is_ready(&self) -> TldrResult<bool> {
        let response = self.authorized(self.client.get(self.endpoint("version"))).send()?;
        Ok(response.status().is_success())
    }

    /// Load the model and keep it resident for the configured keep-alive.
    ///
    /// # Errors
    /// Returns an error if the warm-up request fails.
    pub fn warm_up(&self) -> TldrResult<()> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt: Some(WARMUP_PROMPT),
            stream: false,
            keep_alive: &self.config.keep_alive,
            options: Some(GenerateOptions {
                num_predict: WARMUP_NUM_PREDICT,
                temperature: None,
            }),
        };
        let response = self.post_generate(&request)?;
        ensure_success(&response)?;
        Ok(())
    }

    /// Ask the service to unload the model.
    ///
    /// # Errors
    /// Returns an error if the unload request fails.
    pub fn unload(&self) -> TldrResult<()> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt: None,
            stream: false,
            keep_alive: UNLOAD_KEEP_ALIVE,
            options: None,
        };
        let response = self.post_generate(&request)?;
        ensure_success(&response)?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    fn post_generate(&self, request: &GenerateRequest<'_>) -> TldrResult<Response> {
        let builder = self.client.post(self.endpoint("generate")).json(request);
        Ok(self.authorized(builder).send()?)
    }
}

impl GenerationService for OllamaGenerator {
    type Handle = OllamaHandle;

    fn submit(&self, prompt_text: &str, config: &GenerationConfig) -> TldrResult<OllamaHandle> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt: Some(prompt_text),
            stream: false,
            keep_alive: &self.config.keep_alive,
            options: Some(GenerateOptions {
                num_predict: config.max_words,
                temperature: Some(config.temperature),
            }),
        };

        debug!(
            model = %self.config.model,
            max_words = config.max_words,
            temperature = config.temperature,
            "Submitting generation"
        );

        let response = self.post_generate(&request)?;
        Ok(OllamaHandle { response })
    }

    fn wait(&self, handle: OllamaHandle) -> TldrResult<GenerationResult> {
        ensure_success(&handle.response)?;
        let body = handle.response.text()?;
        let decoded: GenerateResponse = serde_json::from_str(&body)?;
        Ok(decoded.into())
    }
}

fn ensure_success(response: &Response) -> TldrResult<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(TldrError::HttpStatus(status.as_u16()))
    }
}
