//! Shared configuration and error types.

pub mod config;
pub mod errors;

pub use config::{AppConfig, GenerationConfig, OllamaConfig, PromptConfig, ServerConfig};
pub use errors::{TldrError, TldrResult};
