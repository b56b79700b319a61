//! diffscribe - A CLI tool that writes commit messages for diffs of any size.
//!
//! # Overview
//!
//! A diff that fits the model's token budget goes to the LLM in one request.
//! Larger diffs are cut along a ladder of delimiters (file headers, blank
//! lines, newlines), summarized chunk by chunk, and the summaries compressed
//! until the final commit-message request fits. Every layer of summaries is
//! kept below the message as "## More Detail" sections.

pub mod budget;
pub mod diff;
pub mod error;
pub mod llm;
pub mod logging;
pub mod output;
pub mod summarize;

// Re-export commonly used types
pub use budget::{DEFAULT_MODEL, LARGE_MODEL, budget_for, known_models};
pub use error::{DiffError, LlmError, SummarizeError};
pub use llm::{CachingClient, LlmClient, OpenAiClient, OpenAiConfig};
pub use summarize::{Ladder, Rung, SplitMode, SummarizeConfig, Summarizer, commit_message};
