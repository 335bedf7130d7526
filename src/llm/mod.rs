//! Generation service contract and its Ollama-backed implementation.

pub mod generation;
pub mod ollama_generator;
pub mod session;

pub use generation::{GenerationResult, GenerationService, extract_generation};
pub use ollama_generator::{OllamaGenerator, OllamaHandle};
pub use session::ModelSession;

#[cfg(test)]
pub(crate) mod test_support;
