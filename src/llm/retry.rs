//! Exponential backoff retry logic for LLM requests.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::warn;

/// Default: 3 total attempts, base 1s, max 30s.
pub const MAX_ATTEMPTS: u32 = 3;
const INITIAL_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 30;

/// How many times to try a request and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            initial_interval: Duration::from_secs(INITIAL_INTERVAL_SECS),
            max_interval: Duration::from_secs(MAX_INTERVAL_SECS),
        }
    }
}

/// Retry an async operation with exponential backoff.
///
/// `attempt` is called up to `policy.max_attempts` times (at least once).
/// Errors for which `is_retryable` is false are returned immediately,
/// unwrapped. When the last attempt fails, `wrap_exhausted` converts its
/// error into the caller's `RetriesExhausted` variant.
pub async fn retry_with_backoff<T, E, Fut, F, R, W>(
    policy: &RetryPolicy,
    mut attempt: F,
    is_retryable: R,
    wrap_exhausted: W,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    W: FnOnce(E) -> E,
    E: Display,
{
    let mut backoff = ExponentialBackoff {
        initial_interval: policy.initial_interval,
        max_interval: policy.max_interval,
        max_elapsed_time: None,
        ..Default::default()
    };

    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;

        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if !is_retryable(&e) => return Err(e),
            Err(e) if attempts >= max_attempts => return Err(wrap_exhausted(e)),
            Err(e) => {
                warn!("Attempt {attempts}/{max_attempts} failed: {e}. Retrying.");
                if let Some(wait_duration) = backoff.next_backoff() {
                    tokio::time::sleep(wait_duration).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient(String),
        Fatal(String),
        RetriesExhausted(Box<TestError>),
    }

    impl Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{self:?}")
        }
    }

    fn transient(e: &TestError) -> bool {
        matches!(e, TestError::Transient(_))
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_on_first_attempt() {
        let result: Result<&str, TestError> = retry_with_backoff(
            &RetryPolicy::default(),
            || async { Ok("ok") },
            transient,
            |e| TestError::RetriesExhausted(Box::new(e)),
        )
        .await;
        assert_eq!(result.unwrap(), "ok");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhausts_after_max_attempts() {
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();

        let result: Result<(), TestError> = retry_with_backoff(
            &RetryPolicy::default(),
            move || {
                let c = count_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(TestError::Transient("fail".to_string()))
                }
            },
            transient,
            |e| TestError::RetriesExhausted(Box::new(e)),
        )
        .await;

        assert!(matches!(result, Err(TestError::RetriesExhausted(_))));
        assert_eq!(count.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_after_failures() {
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();

        let result: Result<&str, TestError> = retry_with_backoff(
            &RetryPolicy::default(),
            move || {
                let c = count_clone.clone();
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(TestError::Transient("transient".to_string()))
                    } else {
                        Ok("recovered")
                    }
                }
            },
            transient,
            |e| TestError::RetriesExhausted(Box::new(e)),
        )
        .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_is_not_retried() {
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();

        let result: Result<(), TestError> = retry_with_backoff(
            &RetryPolicy::default(),
            move || {
                let c = count_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(TestError::Fatal("bad key".to_string()))
                }
            },
            transient,
            |e| TestError::RetriesExhausted(Box::new(e)),
        )
        .await;

        assert_eq!(result, Err(TestError::Fatal("bad key".to_string())));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();

        let result: Result<(), TestError> = retry_with_backoff(
            &policy,
            move || {
                let c = count_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(TestError::Transient("fail".to_string()))
                }
            },
            transient,
            |e| TestError::RetriesExhausted(Box::new(e)),
        )
        .await;

        assert!(matches!(result, Err(TestError::RetriesExhausted(_))));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
