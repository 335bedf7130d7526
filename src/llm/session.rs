//! Scoped model session: warm the model on acquire, unload it on drop.

use tracing::{info, warn};

use crate::common::errors::TldrResult;
use crate::llm::ollama_generator::OllamaGenerator;

/// Keeps the remote model loaded for the lifetime of the guard.
#[derive(Debug)]
pub struct ModelSession<'a> {
    generator: &'a OllamaGenerator,
}

impl<'a> ModelSession<'a> {
    /// Warm up the model and return a guard that unloads it when dropped.
    ///
    /// # Errors
    /// Returns an error if the warm-up request fails.
    pub fn acquire(generator: &'a OllamaGenerator) -> TldrResult<Self> {
        generator.warm_up()?;
        info!(model = generator.model(), "Model session acquired");
        Ok(Self { generator })
    }

    /// Generator bound to this session.
    #[must_use]
    pub const fn generator(&self) -> &'a OllamaGenerator {
        self.generator
    }
}

impl Drop for ModelSession<'_> {
    fn drop(&mut self) {
        match self.generator.unload() {
            Ok(()) => info!(model = self.generator.model(), "Model session released"),
            Err(err) => warn!(model = self.generator.model(), "Failed to release model session: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::common::config::OllamaConfig;
    use crate::llm::test_support::mock_generate;

    #[test]
    fn test_session_warms_up_then_unloads_on_drop() {
        let (addr, recorded) = mock_generate(json!({"response": "", "done": true}), StatusCode::OK);
        let config = OllamaConfig {
            base_url: format!("http://{addr}"),
            ..OllamaConfig::default()
        };
        let generator = OllamaGenerator::new(&config).unwrap();

        {
            let session = ModelSession::acquire(&generator).unwrap();
            assert_eq!(session.generator().model(), config.model);
            assert_eq!(recorded.bodies.lock().unwrap().len(), 1);
        }

        let bodies = recorded.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0]["keep_alive"], "5m");
        assert_eq!(bodies[1]["keep_alive"], "0");
    }

    #[test]
    fn test_failed_warm_up_does_not_create_session() {
        let (addr, recorded) =
            mock_generate(json!({"error": "boom"}), StatusCode::INTERNAL_SERVER_ERROR);
        let config = OllamaConfig {
            base_url: format!("http://{addr}"),
            ..OllamaConfig::default()
        };
        let generator = OllamaGenerator::new(&config).unwrap();

        assert!(ModelSession::acquire(&generator).is_err());
        assert_eq!(recorded.bodies.lock().unwrap().len(), 1);
    }
}
