//! Recursive summarization of text that may not fit a single request.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::SummarizeError;
use crate::llm::LlmClient;

use super::chunk::assemble_chunks;
use super::config::SummarizeConfig;
use super::split::split_text;

type SummaryFuture<'s> = Pin<Box<dyn Future<Output = Result<Vec<String>, SummarizeError>> + Send + 's>>;

/// Summarizes text of any size under the configured token budget.
///
/// Requests are made one at a time, in text order.
pub struct Summarizer<'a, C: LlmClient + ?Sized> {
    client: &'a C,
    config: &'a SummarizeConfig,
}

impl<'a, C: LlmClient + ?Sized> Summarizer<'a, C> {
    pub fn new(client: &'a C, config: &'a SummarizeConfig) -> Self {
        Self { client, config }
    }

    /// Summarize `text` with `prompt`, starting from the coarsest rung.
    ///
    /// Returns one summary if `prompt + text` fits the budget, otherwise one or
    /// more summaries per chunk, in text order.
    pub async fn summarize(&self, text: &str, prompt: &str) -> Result<Vec<String>, SummarizeError> {
        self.summarize_from(text, 0, prompt).await
    }

    /// Summarize `text` using the ladder from `rung_index` onwards.
    ///
    /// Fails with [`SummarizeError::BudgetExhausted`] when the text does not fit
    /// and no rung is left to split it with, and with
    /// [`SummarizeError::PromptTooLarge`] when the prompt alone leaves no room.
    pub fn summarize_from<'s>(
        &'s self,
        text: &'s str,
        rung_index: usize,
        prompt: &'s str,
    ) -> SummaryFuture<'s> {
        Box::pin(async move {
            let budget = self.config.budget;
            let query = format!("{prompt}{text}");
            let tokens = self.client.get_num_tokens(&query);

            if tokens <= budget {
                debug!("Summarizing {tokens} tokens in one request");
                return Ok(vec![self.client.ask(&query).await?]);
            }

            let prompt_tokens = self.client.get_num_tokens(prompt);
            if prompt_tokens >= budget {
                return Err(SummarizeError::PromptTooLarge {
                    tokens: prompt_tokens,
                    budget,
                });
            }

            let Some(rung) = self.config.ladder.rung(rung_index) else {
                return Err(SummarizeError::BudgetExhausted { tokens, budget });
            };

            let parts = split_text(text, rung);
            let counts: Vec<usize> = parts
                .iter()
                .map(|part| self.client.get_num_tokens(part))
                .collect();
            // The budget bounds prompt plus text, so chunks get what the prompt leaves.
            let chunk_budget = budget - prompt_tokens;
            let chunks = assemble_chunks(&parts, &counts, chunk_budget);

            debug!(
                "{tokens} tokens over budget {budget}: split at {:?} into {} parts, {} chunks",
                rung.as_str(),
                parts.len(),
                chunks.len()
            );

            let mut summaries = Vec::with_capacity(chunks.len());
            for chunk in &chunks {
                let query = format!("{prompt}{}", chunk.text);
                if self.client.get_num_tokens(&query) <= budget {
                    summaries.push(self.client.ask(&query).await?);
                } else {
                    let nested = self
                        .summarize_from(&chunk.text, rung_index + 1, prompt)
                        .await?;
                    summaries.extend(nested);
                }
            }

            Ok(summaries)
        })
    }
}
