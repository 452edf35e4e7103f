//! dumpdo-common — Shared types and errors used across all Dump.do crates.

pub mod error;
pub mod mode;

pub use error::{DumpError, Result};
pub use mode::ChatMode;
