//! OpenAI chat-completions client.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tiktoken_rs::CoreBPE;
use tracing::{debug, warn};

use crate::error::LlmError;

use super::LlmClient;
use super::retry::{RetryPolicy, retry_with_backoff};

/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for a single request (2 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "DIFFSCRIBE_TIMEOUT";

/// Get the configured timeout duration.
///
/// Reads from DIFFSCRIBE_TIMEOUT environment variable if set,
/// otherwise uses the default of 120 seconds.
///
/// Logs a warning if the environment variable is set but contains
/// an invalid value (non-numeric or negative).
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Connection and sampling settings for [`OpenAiClient`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub model: String,
    /// Sampling temperature in `[0, 2]`.
    pub temperature: f32,
    pub api_key: String,
    /// API root without trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl OpenAiConfig {
    /// Build a config from `OPENAI_API_KEY`, `OPENAI_BASE_URL` and
    /// `DIFFSCRIBE_TIMEOUT`.
    pub fn from_env(model: &str, temperature: f32) -> Result<Self, LlmError> {
        let api_key = env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let base_url = env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            model: model.to_string(),
            temperature,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: get_timeout(),
            retry: RetryPolicy::default(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Chat-completions client with tiktoken token counting.
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
    bpe: CoreBPE,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let bpe = tiktoken_rs::get_bpe_from_model(&config.model).map_err(|e| {
            LlmError::Tokenizer {
                model: config.model.clone(),
                reason: e.to_string(),
            }
        })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LlmError::ClientBuild)?;

        Ok(Self { http, config, bpe })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Single attempt at a completion.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        debug!("Sending {} chars to {}", prompt.len(), self.config.model);
        retry_with_backoff(
            &self.config.retry,
            || self.complete(prompt),
            LlmError::is_retryable,
            |e| LlmError::RetriesExhausted(Box::new(e)),
        )
        .await
    }

    fn get_num_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}
