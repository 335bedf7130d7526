//! Prompt construction modules.

pub mod prompt_budget;
pub mod prompt_builder;

pub use prompt_budget::{TokenBudget, word_count};
pub use prompt_builder::{PROMPT_TEMPLATE, PromptBuilder, PromptRequest};
