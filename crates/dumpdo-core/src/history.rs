//! Bounded conversation-history window.
//!
//! The model sees at most the last 10 messages and at most 8000 characters
//! of them, whichever bound binds first. Newer messages always win over
//! older ones.

use crate::session::StoredMessage;
use dumpdo_llm::Message;

pub const MAX_HISTORY_MESSAGES: usize = 10;
pub const MAX_HISTORY_CHARS: usize = 8000;

/// Build the provider-facing history window from stored messages
/// (chronological order in, chronological order out).
pub fn build_history(messages: &[StoredMessage]) -> Vec<Message> {
    let mut window = Vec::new();
    let mut chars = 0usize;

    for msg in messages.iter().rev().take(MAX_HISTORY_MESSAGES) {
        let len = msg.content.chars().count();
        if chars + len > MAX_HISTORY_CHARS && !window.is_empty() {
            break;
        }
        chars += len;
        window.push(match msg.role.as_str() {
            "assistant" => Message::assistant(&msg.content),
            _ => Message::user(&msg.content),
        });
        if chars >= MAX_HISTORY_CHARS {
            break;
        }
    }

    window.reverse();
    window
}
