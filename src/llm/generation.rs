//! Contract with the external generation service.

use serde::{Deserialize, Serialize};

use crate::common::config::GenerationConfig;
use crate::common::errors::{TldrError, TldrResult};

/// Typed outcome of a generation job.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Text produced by the model, if any.
    pub generated_text: Option<String>,
}

impl GenerationResult {
    /// Result carrying generated text.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            generated_text: Some(text.into()),
        }
    }
}

/// A text-generation backend reached through submit/wait.
///
/// `submit` hands the prompt over; `wait` blocks until the job is done.
/// Timeouts and cancellation belong to the implementation's client.
pub trait GenerationService {
    /// In-flight job returned by [`GenerationService::submit`].
    type Handle;

    /// Submit a prompt with explicit per-request settings.
    ///
    /// # Errors
    /// Returns an error if the service rejects or cannot receive the request.
    fn submit(&self, prompt_text: &str, config: &GenerationConfig) -> TldrResult<Self::Handle>;

    /// Block until the job completes.
    ///
    /// # Errors
    /// Returns an error if the job fails or its response cannot be decoded.
    fn wait(&self, handle: Self::Handle) -> TldrResult<GenerationResult>;
}

/// Pull the generated text out of a result.
///
/// # Errors
/// Returns [`TldrError::MissingGeneration`] when no text was produced.
pub fn extract_generation(result: GenerationResult) -> TldrResult<String> {
    result.generated_text.ok_or(TldrError::MissingGeneration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_generation_present() {
        let text = extract_generation(GenerationResult::with_text("Summary.")).unwrap();
        assert_eq!(text, "Summary.");
    }

    #[test]
    fn test_extract_generation_empty_text_is_present() {
        let text = extract_generation(GenerationResult::with_text("")).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_extract_generation_missing() {
        let err = extract_generation(GenerationResult::default()).unwrap_err();
        assert!(matches!(err, TldrError::MissingGeneration));
    }
}
