//! dumpdo-llm — generative-model backend abstraction for Dump.do.
//!
//! The pipeline treats the model as an opaque function returning text (or
//! structured JSON). This crate hides the provider wire formats behind the
//! [`backend::LlmBackend`] trait and adds bounded-timeout/retry policy on top.

pub mod backend;
pub mod retry;

pub use backend::{
    AnthropicBackend, GeminiBackend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message,
    OpenAiBackend,
};
pub use retry::{complete_with_retry, RetryPolicy};
