//! Error types for diffscribe modules using thiserror.

use thiserror::Error;

use crate::budget::known_models;

/// Errors from the summarization core.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Unknown model '{0}'. Known models: {known}", known = known_models().join(", "))]
    UnknownModel(String),

    #[error(
        "Text of {tokens} tokens cannot be split below the {budget}-token budget: every delimiter has been tried"
    )]
    BudgetExhausted { tokens: usize, budget: usize },

    #[error(
        "Prompt of {tokens} tokens leaves no room for text within the {budget}-token budget. Use a shorter prompt."
    )]
    PromptTooLarge { tokens: usize, budget: usize },

    #[error(
        "Summaries still exceed the token budget after {passes} compression passes. The model is not shortening its input."
    )]
    CompressionStalled { passes: usize },

    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),
}

/// Errors from the LLM client.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not set. Export an API key to query the model.")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("LLM API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("LLM API returned an unparseable response: {0}")]
    InvalidResponse(String),

    #[error("LLM API returned no completion")]
    EmptyResponse,

    #[error("No tokenizer available for model '{model}': {reason}")]
    Tokenizer { model: String, reason: String },

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<LlmError>),
}

impl LlmError {
    /// Whether another attempt at the same request may succeed.
    ///
    /// Transport failures, rate limiting (429) and server errors (5xx) are
    /// transient. Everything else fails the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(_) => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Errors from collecting the diff to describe.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to collect staged diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to read diff from stdin: {0}")]
    ReadStdin(#[source] std::io::Error),
}
