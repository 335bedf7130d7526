//! Executive-summary pipeline over a generation service.

use tracing::{debug, info_span};
use uuid::Uuid;

use crate::common::config::{AppConfig, GenerationConfig};
use crate::common::errors::TldrResult;
use crate::llm::generation::{GenerationService, extract_generation};
use crate::prompt::prompt_builder::PromptBuilder;
use crate::summarization::sanitizer::ResponseSanitizer;

/// Turns input text into a sanitized executive summary.
#[derive(Clone, Debug)]
pub struct TldrSummarizer<G> {
    service: G,
    builder: PromptBuilder,
    sanitizer: ResponseSanitizer,
    generation: GenerationConfig,
}

impl<G: GenerationService> TldrSummarizer<G> {
    /// Create a summarizer over `service` using the prompt and generation settings of `config`.
    ///
    /// # Errors
    /// Returns an error if the sanitizer cannot be compiled.
    pub fn new(service: G, config: &AppConfig) -> TldrResult<Self> {
        Ok(Self {
            service,
            builder: PromptBuilder::new(&config.prompt),
            sanitizer: ResponseSanitizer::new()?,
            generation: config.generation,
        })
    }

    /// Underlying generation service.
    #[must_use]
    pub const fn service(&self) -> &G {
        &self.service
    }

    /// Generate a summary of `input_text`.
    ///
    /// Blocks until the service answers. Nothing is retried.
    ///
    /// # Errors
    /// Returns [`crate::common::errors::TldrError::MissingGeneration`] if the
    /// response has no generated text, or the service's own error otherwise.
    pub fn generate(&self, input_text: &str) -> TldrResult<String> {
        let request_id = Uuid::new_v4();
        let span = info_span!("generate", %request_id);
        let _guard = span.enter();

        let request = self.builder.build(input_text);
        let handle = self.service.submit(&request.prompt_text, &self.generation)?;
        let result = self.service.wait(handle)?;
        let raw = extract_generation(result)?;
        let summary = self.sanitizer.sanitize(&raw);

        debug!(
            max_tokens = request.max_tokens,
            raw_chars = raw.len(),
            summary_chars = summary.len(),
            "Generated summary"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::common::errors::TldrError;
    use crate::llm::generation::GenerationResult;

    struct FakeService {
        reply: GenerationResult,
        seen: RefCell<Vec<(String, GenerationConfig)>>,
    }

    impl FakeService {
        fn replying(reply: GenerationResult) -> Self {
            Self {
                reply,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl GenerationService for FakeService {
        type Handle = GenerationResult;

        fn submit(&self, prompt_text: &str, config: &GenerationConfig) -> TldrResult<Self::Handle> {
            self.seen
                .borrow_mut()
                .push((prompt_text.to_string(), *config));
            Ok(self.reply.clone())
        }

        fn wait(&self, handle: Self::Handle) -> TldrResult<GenerationResult> {
            Ok(handle)
        }
    }

    struct FailingService;

    impl GenerationService for FailingService {
        type Handle = ();

        fn submit(&self, _prompt_text: &str, _config: &GenerationConfig) -> TldrResult<()> {
            Err(TldrError::HttpStatus(503))
        }

        fn wait(&self, (): ()) -> TldrResult<GenerationResult> {
            Ok(GenerationResult::default())
        }
    }

    #[test]
    fn test_generate_sanitizes_reply() {
        let service = FakeService::replying(GenerationResult::with_text(
            "Airflow leads orchestration.\n-active community.\n-big mindshare. Also it",
        ));
        let summarizer = TldrSummarizer::new(service, &AppConfig::default()).unwrap();

        let summary = summarizer.generate("Airflow is an orchestrator.").unwrap();
        assert_eq!(
            summary,
            "Airflow leads orchestration.\n\n- active community.\n\n- big mindshare."
        );
    }

    #[test]
    fn test_generate_submits_prompt_with_explicit_config() {
        let service = FakeService::replying(GenerationResult::with_text("Done."));
        let summarizer = TldrSummarizer::new(service, &AppConfig::default()).unwrap();

        summarizer.generate("Some input text").unwrap();

        let seen = summarizer.service().seen.borrow();
        assert_eq!(seen.len(), 1);
        let (prompt, config) = &seen[0];
        assert!(prompt.ends_with("technical text: Some input text."));
        assert!(prompt.contains("under\n400 tokens"));
        assert_eq!(*config, GenerationConfig::default());
    }

    #[test]
    fn test_generate_missing_generation() {
        let service = FakeService::replying(GenerationResult::default());
        let summarizer = TldrSummarizer::new(service, &AppConfig::default()).unwrap();

        let err = summarizer.generate("text").unwrap_err();
        assert!(matches!(err, TldrError::MissingGeneration));
    }

    #[test]
    fn test_generate_passes_service_errors_through() {
        let summarizer = TldrSummarizer::new(FailingService, &AppConfig::default()).unwrap();
        let err = summarizer.generate("text").unwrap_err();
        assert!(matches!(err, TldrError::HttpStatus(503)));
    }

    #[test]
    fn test_generate_empty_input() {
        let service = FakeService::replying(GenerationResult::with_text("   "));
        let summarizer = TldrSummarizer::new(service, &AppConfig::default()).unwrap();
        assert_eq!(summarizer.generate("").unwrap(), "");
    }
}
