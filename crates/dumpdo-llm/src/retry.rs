//! Bounded timeout and retry policy for provider calls.
//!
//! Retryable failures (timeouts, 429, 5xx, transport errors) back off
//! exponentially with jitter up to a fixed attempt ceiling. Non-retryable
//! failures (bad credentials, safety blocks) surface immediately. No partial
//! generation is ever returned.

use crate::backend::{LlmBackend, LlmError, LlmRequest, LlmResponse};
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff_ms: u64,
    /// Per-attempt deadline for the provider call.
    pub timeout_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, base_backoff_ms: 500, timeout_secs: 30 }
    }
}

impl RetryPolicy {
    /// Exponential backoff with up to 50% additive jitter.
    fn backoff(&self, attempt: u32) -> Duration {
        let base = self.base_backoff_ms.saturating_mul(1u64 << attempt.min(6));
        let jitter = rand::thread_rng().gen_range(0..=base / 2);
        Duration::from_millis(base + jitter)
    }
}

/// Call a backend with bounded timeout and the given retry policy.
pub async fn complete_with_retry(
    backend: &dyn LlmBackend,
    req: LlmRequest,
    policy: &RetryPolicy,
) -> Result<LlmResponse, LlmError> {
    let mut last_err = None;

    for attempt in 0..policy.max_attempts {
        let call = backend.complete(req.clone());
        let result = match tokio::time::timeout(Duration::from_secs(policy.timeout_secs), call).await
        {
            Ok(inner) => inner,
            Err(_) => Err(LlmError::Timeout(policy.timeout_secs)),
        };

        match result {
            Ok(resp) => return Ok(resp),
            Err(err) if err.is_retryable() && attempt + 1 < policy.max_attempts => {
                let wait = policy.backoff(attempt);
                tracing::warn!(
                    model = backend.model_id(),
                    attempt = attempt + 1,
                    backoff_ms = wait.as_millis() as u64,
                    error = %err,
                    "retryable provider error"
                );
                tokio::time::sleep(wait).await;
                last_err = Some(err);
            }
            Err(err) => return Err(err),
        }
    }

    Err(last_err.unwrap_or_else(|| LlmError::Unavailable("retries exhausted".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Message;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyBackend {
        calls: AtomicU32,
        fail_first: u32,
        error_status: u16,
    }

    #[async_trait]
    impl LlmBackend for FlakyBackend {
        async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first {
                return Err(LlmError::ApiError {
                    status: self.error_status,
                    message: "induced".to_string(),
                });
            }
            Ok(LlmResponse {
                content: "ok".to_string(),
                model: "mock".to_string(),
                prompt_tokens: 1,
                completion_tokens: 1,
            })
        }

        fn model_id(&self) -> &str {
            "mock"
        }
    }

    fn req() -> LlmRequest {
        LlmRequest::new(vec![Message::user("oi")])
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy { max_attempts: 3, base_backoff_ms: 1, timeout_secs: 5 }
    }

    #[tokio::test]
    async fn test_retryable_error_eventually_succeeds() {
        let backend = FlakyBackend { calls: AtomicU32::new(0), fail_first: 2, error_status: 503 };
        let resp = complete_with_retry(&backend, req(), &fast_policy()).await.unwrap();
        assert_eq!(resp.content, "ok");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_fast() {
        let backend = FlakyBackend { calls: AtomicU32::new(0), fail_first: 5, error_status: 401 };
        let err = complete_with_retry(&backend, req(), &fast_policy()).await.unwrap_err();
        assert!(matches!(err, LlmError::ApiError { status: 401, .. }));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_exhausted_returns_last_error() {
        let backend = FlakyBackend { calls: AtomicU32::new(0), fail_first: 10, error_status: 503 };
        let err = complete_with_retry(&backend, req(), &fast_policy()).await.unwrap_err();
        assert!(matches!(err, LlmError::ApiError { status: 503, .. }));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    }
}
