//! Prompt builder for executive summaries.

use tracing::debug;

use crate::common::config::PromptConfig;
use crate::prompt::prompt_budget::{TokenBudget, word_count};

/// Executive-summary instruction with `{input_type}`, `{max_n_tokens}` and `{in_text}` slots.
pub const PROMPT_TEMPLATE: &str = "Act as an executive assistant and write an executive summary of a {input_type}. Write the
summary as paragraphs, separate each paragraph with two new lines. Focus on the key message and skip side
information. Keep each paragraph short and less than 40 words by removing fluffy words. Keep your output under
{max_n_tokens} tokens.

{input_type}: {in_text}.";

/// A fully prepared prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptRequest {
    /// Caller text being summarized.
    pub input_text: String,
    /// Label for the kind of text.
    pub input_type: String,
    /// Token budget written into the prompt.
    pub max_tokens: u32,
    /// Filled template, ready to submit.
    pub prompt_text: String,
}

/// Fills [`PROMPT_TEMPLATE`] from caller text.
#[derive(Clone, Debug)]
pub struct PromptBuilder {
    budget: TokenBudget,
    input_type: String,
}

impl PromptBuilder {
    /// Create a builder from prompt settings.
    #[must_use]
    pub fn new(config: &PromptConfig) -> Self {
        Self {
            budget: TokenBudget::from_config(config),
            input_type: config.input_type.clone(),
        }
    }

    /// Token budget in use.
    #[must_use]
    pub const fn budget(&self) -> TokenBudget {
        self.budget
    }

    /// Build the prompt for `input_text`. Any input is accepted, including empty text.
    #[must_use]
    pub fn build(&self, input_text: &str) -> PromptRequest {
        let words = word_count(input_text);
        let max_tokens = self.budget.max_tokens(words);
        let prompt_text = render_template(&self.input_type, max_tokens, input_text);

        debug!(
            words,
            max_tokens,
            prompt_chars = prompt_text.len(),
            "Built summary prompt"
        );

        PromptRequest {
            input_text: input_text.to_string(),
            input_type: self.input_type.clone(),
            max_tokens,
            prompt_text,
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(&PromptConfig::default())
    }
}

// `{in_text}` goes last so slot names inside user text stay verbatim.
fn render_template(input_type: &str, max_tokens: u32, input_text: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{input_type}", input_type)
        .replace("{max_n_tokens}", &max_tokens.to_string())
        .replace("{in_text}", input_text)
}
