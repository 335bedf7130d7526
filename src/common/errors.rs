//! Error types for the summarization pipeline.

use thiserror::Error;

/// Pipeline error type.
#[derive(Debug, Error)]
pub enum TldrError {
    /// The generation service answered without any generated text.
    #[error("completion not found: response carried no generated text")]
    MissingGeneration,
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    /// HTTP client error.
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// Generation service replied with a non-success status.
    #[error("generation service http status not ok: {0}")]
    HttpStatus(u16),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Regex compilation error.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for pipeline operations.
pub type TldrResult<T> = Result<T, TldrError>;
