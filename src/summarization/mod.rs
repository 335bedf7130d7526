//! Summary generation and output cleanup.

pub mod sanitizer;
pub mod summarizer;

pub use sanitizer::ResponseSanitizer;
pub use summarizer::TldrSummarizer;
