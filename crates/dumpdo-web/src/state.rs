//! Shared application state for the web server.

use crate::config::Config;
use crate::rate_limit::RateLimiter;
use dumpdo_core::{ChatPipeline, InMemorySessionStore};
use dumpdo_llm::{AnthropicBackend, GeminiBackend, LlmBackend, OpenAiBackend, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub pipeline: ChatPipeline,
    pub rate_limiter: RateLimiter,
    /// Bearer token required on /api routes. None disables auth (local dev).
    pub auth_token: Option<String>,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;
        let model = config.llm.model.clone();
        let backend: Arc<dyn LlmBackend> = match config.llm.provider.as_str() {
            "gemini" => Arc::new(GeminiBackend::new(api_key, model)),
            "openai" => Arc::new(OpenAiBackend::new(api_key, model)),
            "anthropic" => Arc::new(AnthropicBackend::new(api_key, model)),
            other => anyhow::bail!("unknown llm provider: {other}"),
        };

        let retry = RetryPolicy {
            max_attempts: config.llm.max_attempts,
            timeout_secs: config.llm.timeout_secs,
            ..RetryPolicy::default()
        };
        let pipeline = ChatPipeline::new(backend, Arc::new(InMemorySessionStore::new()))
            .with_retry_policy(retry);

        Ok(Self {
            pipeline,
            rate_limiter: RateLimiter::new(
                config.limits.rate_limit_max_requests,
                Duration::from_secs(config.limits.rate_limit_window_secs),
            ),
            auth_token: std::env::var("DUMPDO_API_TOKEN").ok(),
        })
    }
}

pub type SharedState = Arc<AppState>;
