//! Explicit configuration for one summarization run.

use crate::budget::budget_for;
use crate::error::SummarizeError;

use super::ladder::Ladder;
use super::prompt::{COMPRESS_PROMPT, DEFAULT_COMMIT_PROMPT, DETAIL_PROMPT};

/// Compression passes allowed before giving up on a model that will not
/// shorten its input.
pub const DEFAULT_MAX_COMPRESSION_PASSES: usize = 8;

/// Everything the summarizer and the compression driver read.
///
/// Passed by reference into every call; nothing is read from global state.
#[derive(Debug, Clone)]
pub struct SummarizeConfig {
    /// Maximum tokens of prompt plus text per request.
    pub budget: usize,
    pub ladder: Ladder,
    /// Prompt for the commit message itself.
    pub final_prompt: String,
    /// Prompt for summarizing raw diff chunks.
    pub detail_prompt: String,
    /// Prompt for summarizing a list of summaries.
    pub compress_prompt: String,
    pub max_compression_passes: usize,
}

impl SummarizeConfig {
    /// Defaults with an explicit budget.
    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget,
            ladder: Ladder::default(),
            final_prompt: DEFAULT_COMMIT_PROMPT.to_string(),
            detail_prompt: DETAIL_PROMPT.to_string(),
            compress_prompt: COMPRESS_PROMPT.to_string(),
            max_compression_passes: DEFAULT_MAX_COMPRESSION_PASSES,
        }
    }

    /// Defaults with the budget registered for `model`.
    pub fn for_model(model: &str) -> Result<Self, SummarizeError> {
        Ok(Self::with_budget(budget_for(model)?))
    }

    pub fn final_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.final_prompt = prompt.into();
        self
    }

    pub fn detail_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.detail_prompt = prompt.into();
        self
    }

    pub fn compress_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.compress_prompt = prompt.into();
        self
    }

    pub fn ladder(mut self, ladder: Ladder) -> Self {
        self.ladder = ladder;
        self
    }

    pub fn max_compression_passes(mut self, passes: usize) -> Self {
        self.max_compression_passes = passes;
        self
    }
}
