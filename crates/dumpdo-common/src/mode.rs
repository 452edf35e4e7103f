//! Chat modes.
//!
//! Dump.do sessions run in one of two modes:
//!   Dump      — "mirror" mode: validate, reflect, never advise
//!   Processar — "stabilisation" mode: turn chaos into one concrete action

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Dump,
    Processar,
}

impl Default for ChatMode {
    fn default() -> Self {
        ChatMode::Dump
    }
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Dump => "dump",
            ChatMode::Processar => "processar",
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_roundtrip() {
        let json = serde_json::to_string(&ChatMode::Processar).unwrap();
        assert_eq!(json, "\"processar\"");
        let back: ChatMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChatMode::Processar);
    }

    #[test]
    fn test_default_mode_is_dump() {
        assert_eq!(ChatMode::default(), ChatMode::Dump);
    }
}
