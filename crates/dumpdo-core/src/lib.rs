//! dumpdo-core — chat pipeline for Dump.do.
//!
//! Sequences the full flow for one inbound message:
//!   1. MIND-SAFE risk assessment (before any model call)
//!   2. Emergency bypass: high/critical risk returns a scripted safety
//!      response and never reaches the generative model
//!   3. Otherwise: mode-specific system prompt + bounded history snapshot →
//!      provider call with timeout/retry → structured-output sanitization
//!
//! The provider and the session store are trait seams; the pipeline holds no
//! mutable state of its own across invocations.

pub mod history;
pub mod pipeline;
pub mod prompts;
pub mod sanitize;
pub mod schema;
pub mod session;

pub use pipeline::{ChatOutcome, ChatPipeline, InboundMessage, TokenUsage};
pub use sanitize::DumpReply;
pub use schema::{StructuredResponse, EMOTION_ENUM, LIMITS};
pub use session::{InMemorySessionStore, Session, SessionStore, StoredMessage};
