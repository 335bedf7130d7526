//! Cleanup of raw model output.
//!
//! The pipeline assumes the model emits consistent punctuation: whatever
//! follows the last sentence terminator is treated as a cut-off fragment.

use regex::Regex;

use crate::common::errors::TldrResult;

/// Characters that close a sentence.
pub const TERMINATORS: [char; 4] = ['.', '!', '?', '"'];

/// Newline run, hyphen, then a word glued to the hyphen.
const BULLET_PATTERN: &str = r"\n+-(\w+)";
const BULLET_REPLACEMENT: &str = "\n\n- ${1}";

/// Normalizes bullets and drops trailing partial sentences.
#[derive(Clone, Debug)]
pub struct ResponseSanitizer {
    bullet: Regex,
}

impl ResponseSanitizer {
    /// Compile the sanitizer.
    ///
    /// # Errors
    /// Returns an error if the bullet pattern fails to compile.
    pub fn new() -> TldrResult<Self> {
        Ok(Self {
            bullet: Regex::new(BULLET_PATTERN)?,
        })
    }

    /// Normalize bullets, cut after the last terminator, then trim.
    #[must_use]
    pub fn sanitize(&self, raw: &str) -> String {
        let normalized = self.normalize_bullets(raw);
        truncate_to_last_terminator(&normalized).trim().to_string()
    }

    /// Put every glued `-word` bullet on its own paragraph as `- word`.
    #[must_use]
    pub fn normalize_bullets(&self, text: &str) -> String {
        self.bullet.replace_all(text, BULLET_REPLACEMENT).into_owned()
    }
}

/// Prefix of `text` up to and including the last terminator, or `text` if none.
#[must_use]
pub fn truncate_to_last_terminator(text: &str) -> &str {
    // Terminators are ASCII, so `p + 1` is a char boundary.
    text.rfind(|c: char| TERMINATORS.contains(&c))
        .map_or(text, |p| &text[..=p])
}
