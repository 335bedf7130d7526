//! Token budget derived from the input length.

use crate::common::config::PromptConfig;

/// Output token budget communicated to the model through the prompt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenBudget {
    /// Fraction of the input word count kept as budget.
    pub reduction_factor: f64,
    /// Budget floor.
    pub min_tokens: u32,
}

impl TokenBudget {
    /// Build a budget from prompt settings.
    #[must_use]
    pub const fn from_config(config: &PromptConfig) -> Self {
        Self {
            reduction_factor: config.reduction_factor,
            min_tokens: config.min_tokens,
        }
    }

    /// `max(words * reduction_factor, min_tokens)`, with the product floored.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn max_tokens(&self, words: usize) -> u32 {
        // Float-to-int `as` saturates, so huge inputs clamp to `u32::MAX`.
        let reduced = (words as f64 * self.reduction_factor).floor() as u32;
        reduced.max(self.min_tokens)
    }

    /// Budget for a given text.
    #[must_use]
    pub fn for_text(&self, text: &str) -> u32 {
        self.max_tokens(word_count(text))
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self::from_config(&PromptConfig::default())
    }
}

/// Number of whitespace-separated words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("  one two\nthree\tfour  "), 4);
    }

    #[test]
    fn test_budget_floor() {
        let budget = TokenBudget::default();
        assert_eq!(budget.max_tokens(0), 400);
        assert_eq!(budget.max_tokens(1), 400);
        assert_eq!(budget.max_tokens(4000), 400);
        assert_eq!(budget.for_text("Hello world."), 400);
    }

    #[test]
    fn test_budget_scales_above_threshold() {
        let budget = TokenBudget::default();
        assert_eq!(budget.max_tokens(4015), 401);
        assert_eq!(budget.max_tokens(5123), 512);
        assert_eq!(budget.max_tokens(10_000), 1000);
    }

    #[test]
    fn test_budget_never_below_minimum() {
        let budget = TokenBudget::default();
        for words in [1, 7, 399, 3999, 4001, 12_345, 1_000_000] {
            assert!(budget.max_tokens(words) >= 400);
        }
    }

    #[test]
    fn test_budget_monotonic() {
        let budget = TokenBudget::default();
        let mut previous = budget.max_tokens(4000);
        for words in 4001..6000 {
            let current = budget.max_tokens(words);
            assert!(current >= previous, "budget decreased at {words} words");
            previous = current;
        }
    }

    #[test]
    fn test_budget_from_config() {
        let config = PromptConfig {
            reduction_factor: 0.5,
            min_tokens: 10,
            input_type: "note".to_string(),
        };
        let budget = TokenBudget::from_config(&config);
        assert_eq!(budget.max_tokens(4), 10);
        assert_eq!(budget.max_tokens(41), 20);
    }
}
