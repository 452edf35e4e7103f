//! Structured-output contract for Dump-mode replies.
//!
//! Less freedom = more stability: a fixed JSON shape with hard limits that
//! the sanitizer enforces regardless of what the model returns.

use serde::{Deserialize, Serialize};

/// Closed emotion vocabulary. Anything outside it is silently dropped.
pub const EMOTION_ENUM: &[&str] = &[
    "raiva",
    "tristeza",
    "ansiedade",
    "exaustão",
    "culpa",
    "frustração",
    "confusão",
    "esperança",
    "alívio",
    "incerto",
];

/// Limits enforced server-side.
pub struct Limits {
    pub validation_max_chars: usize,
    pub question_max_chars: usize,
    pub detected_emotions_max: usize,
    /// Budget for the free-form reply variant and the raw-text fallback.
    pub response_max_chars: usize,
    pub micro_action_max_chars: usize,
}

pub const LIMITS: Limits = Limits {
    validation_max_chars: 200,
    question_max_chars: 150,
    detected_emotions_max: 2,
    response_max_chars: 400,
    micro_action_max_chars: 120,
};

/// The sanitized reply contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredResponse {
    /// Empathetic acknowledgment, one clause, ≤ 200 chars, never empty.
    pub validation: String,
    /// At most one interrogative clause, ≤ 150 chars. Present only when the
    /// model judged the content non-obvious.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Ordered, ≤ 2 tags from [`EMOTION_ENUM`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_emotions: Vec<String>,
}

/// Response schema sent to Gemini (OpenAPI 3.0 subset, responseMimeType
/// application/json).
pub fn gemini_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "validation": {
                "type": "string",
                "description": "Validação empática em UMA frase curta. Máximo 200 caracteres.",
                "maxLength": LIMITS.validation_max_chars,
            },
            "question": {
                "type": "string",
                "description": "Pergunta clarificadora OPCIONAL. Só inclua se a pessoa NÃO estiver clara. Máximo 150 chars.",
                "maxLength": LIMITS.question_max_chars,
            },
            "detected_emotions": {
                "type": "array",
                "description": "Até 2 emoções detectadas. Use apenas o enum.",
                "items": { "type": "string", "enum": EMOTION_ENUM },
                "maxItems": LIMITS.detected_emotions_max,
            },
        },
        "required": ["validation"],
    })
}
