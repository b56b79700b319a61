//! Response cache and usage counters around any [`LlmClient`].

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::error::LlmError;

use super::LlmClient;

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageStats {
    /// Requests that reached the wrapped client and succeeded.
    pub requests: usize,
    /// Prompts answered from the cache.
    pub cache_hits: usize,
    /// Tokens of every prompt actually sent.
    pub prompt_tokens: usize,
}

/// Answers repeated prompts from memory and counts what was sent.
///
/// Identical chunks show up when a diff repeats a hunk, and every compression
/// pass may re-ask a prompt it has already seen.
pub struct CachingClient<C> {
    inner: C,
    cache: Mutex<HashMap<String, String>>,
    requests: AtomicUsize,
    cache_hits: AtomicUsize,
    prompt_tokens: AtomicUsize,
}

impl<C: LlmClient> CachingClient<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
            requests: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            prompt_tokens: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn stats(&self) -> UsageStats {
        UsageStats {
            requests: self.requests.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            prompt_tokens: self.prompt_tokens.load(Ordering::Relaxed),
        }
    }

    /// One-line usage summary, e.g. `requests: 3, cache hits: 1, prompt tokens: 5120`.
    pub fn counter_string(&self) -> String {
        let stats = self.stats();
        format!(
            "requests: {}, cache hits: {}, prompt tokens: {}",
            stats.requests, stats.cache_hits, stats.prompt_tokens
        )
    }

    fn lookup(&self, prompt: &str) -> Option<String> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(prompt).cloned()
    }

    fn store(&self, prompt: &str, answer: &str) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(prompt.to_string(), answer.to_string());
    }
}

#[async_trait]
impl<C: LlmClient> LlmClient for CachingClient<C> {
    async fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        if let Some(answer) = self.lookup(prompt) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for {} char prompt", prompt.len());
            return Ok(answer);
        }

        let tokens = self.inner.get_num_tokens(prompt);
        let answer = self.inner.ask(prompt).await?;
        debug!("LLM returned:\n{answer}");

        self.requests.fetch_add(1, Ordering::Relaxed);
        self.prompt_tokens.fetch_add(tokens, Ordering::Relaxed);
        self.store(prompt, &answer);

        Ok(answer)
    }

    fn get_num_tokens(&self, text: &str) -> usize {
        self.inner.get_num_tokens(text)
    }
}
