//! LLM client: the capability the summarizer needs, and its implementations.

pub mod cache;
pub mod openai;
pub mod retry;

use async_trait::async_trait;

use crate::error::LlmError;

pub use cache::{CachingClient, UsageStats};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use retry::{RetryPolicy, retry_with_backoff};

/// A text-completion service with a model-specific tokenizer.
///
/// This abstraction allows mocking the model in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send `prompt` and return the model's answer.
    async fn ask(&self, prompt: &str) -> Result<String, LlmError>;

    /// Count tokens the way the model does. Deterministic for a given model.
    fn get_num_tokens(&self, text: &str) -> usize;
}
