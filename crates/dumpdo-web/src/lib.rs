//! dumpdo-web — HTTP boundary for Dump.do.
//!
//! Thin Axum layer over the chat pipeline: bearer auth, per-user rate
//! limiting, input validation, and JSON wire shapes. All conversational
//! logic lives in dumpdo-core.

pub mod config;
pub mod handlers;
pub mod rate_limit;
pub mod router;
pub mod state;
