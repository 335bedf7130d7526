//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::common::config::AppConfig;
use crate::common::errors::TldrResult;
use crate::llm::ollama_generator::OllamaGenerator;
use crate::summarization::summarizer::TldrSummarizer;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Summary pipeline over the Ollama generator.
    pub summarizer: TldrSummarizer<OllamaGenerator>,
}

impl AppState {
    /// Create the application state from validated configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the generator cannot be built.
    pub fn new(config: &AppConfig) -> TldrResult<Arc<Self>> {
        config.validate()?;
        let generator = OllamaGenerator::new(&config.ollama)?;
        let summarizer = TldrSummarizer::new(generator, config)?;
        Ok(Arc::new(Self { summarizer }))
    }

    /// Generator behind the summarizer.
    #[must_use]
    pub const fn generator(&self) -> &OllamaGenerator {
        self.summarizer.service()
    }
}
