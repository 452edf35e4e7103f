//! Model-output sanitization.
//!
//! Whatever the model returns, the contract holds: field length budgets with
//! word-boundary-safe truncation, a single interrogative clause per reply,
//! a closed emotion vocabulary, and a graceful fallback when the output is
//! not parseable JSON at all.

use crate::schema::{StructuredResponse, EMOTION_ENUM, LIMITS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

/// Neutral acknowledgment used whenever a reply would otherwise be empty.
pub const DEFAULT_ACK: &str = "Entendi.";

/// Truncate to `max_chars` without cutting mid-word: hard-cut at the limit,
/// then backtrack to the last space if one exists past 70% of the limit.
pub fn truncate_word_boundary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let cut = cut.trim_end();
    if let Some(byte_pos) = cut.rfind(' ') {
        let char_pos = cut[..byte_pos].chars().count();
        if char_pos as f64 > max_chars as f64 * 0.7 {
            return cut[..byte_pos].to_string();
        }
    }
    cut.to_string()
}

/// Enumerated options like "A) cansado B) vazio" — these legitimately carry
/// more than one `?` and must not be cut at the first one.
fn has_enumerated_options(text: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|\s)[A-D][).]\s").expect("invalid options pattern"))
        .is_match(text)
}

/// Collapse to a single interrogative clause: keep everything up to the
/// first `?` and discard the rest. Text without a `?` passes through
/// unchanged, and multiple-choice option lists are kept intact.
pub fn collapse_questions(text: &str) -> String {
    if has_enumerated_options(text) {
        return text.to_string();
    }
    match text.find('?') {
        Some(i) => text[..=i].trim().to_string(),
        None => text.to_string(),
    }
}

/// Keep only vocabulary emotions, lowercased, order preserved, capped.
fn sanitize_emotions(raw: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.to_lowercase())
        .filter(|s| EMOTION_ENUM.contains(&s.as_str()))
        .take(LIMITS.detected_emotions_max)
        .collect()
}

/// Sanitize a parsed structured reply before assembling the final message.
pub fn sanitize_structured(raw: &Value) -> StructuredResponse {
    let validation = raw
        .get("validation")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let mut validation = truncate_word_boundary(validation, LIMITS.validation_max_chars);
    if validation.trim().is_empty() {
        validation = DEFAULT_ACK.to_string();
    }

    let question = raw
        .get("question")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| {
            let q = truncate_word_boundary(q, LIMITS.question_max_chars);
            collapse_questions(&q)
        })
        .filter(|q| !q.is_empty());

    StructuredResponse {
        validation,
        question,
        detected_emotions: sanitize_emotions(raw.get("detected_emotions")),
    }
}

/// Final user-facing message: validation, then the question if present,
/// space-joined. Pure and deterministic.
pub fn assemble_message(response: &StructuredResponse) -> String {
    match &response.question {
        Some(q) if !q.trim().is_empty() => format!("{} {}", response.validation, q),
        _ => response.validation.clone(),
    }
}

/// Degrade-gracefully path for unparseable model output: the raw text is
/// truncated to the response budget and treated as validation-only.
pub fn fallback_reply(raw: &str) -> String {
    let cut: String = raw.chars().take(LIMITS.response_max_chars).collect();
    let cut = cut.trim().to_string();
    if cut.is_empty() {
        DEFAULT_ACK.to_string()
    } else {
        cut
    }
}

// ── Free-form reply variant (listen-only endpoint) ───────────────────────────

/// Sanitized single-field reply used by the /api/dump endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpReply {
    pub response: String,
    pub detected_emotions: Vec<String>,
    pub micro_action: Option<String>,
    pub should_end: bool,
}

/// Sanitize the free-form JSON variant: `response` capped at 400 chars with
/// the same first-`?` rule (options lists exempt), optional `micro_action`
/// capped at 120 chars, `should_end` defaulting to false.
pub fn sanitize_freeform(raw: &Value) -> DumpReply {
    let mut response = raw
        .get("response")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .unwrap_or("")
        .to_string();
    if response.is_empty() {
        response = DEFAULT_ACK.to_string();
    }

    if response.chars().count() > LIMITS.response_max_chars {
        if has_enumerated_options(&response) {
            let cut: String = response.chars().take(LIMITS.response_max_chars).collect();
            let cut = cut.trim_end();
            response = match cut.rfind(' ') {
                Some(byte_pos)
                    if cut[..byte_pos].chars().count() > LIMITS.response_max_chars - 30 =>
                {
                    cut[..byte_pos].trim_end().to_string()
                }
                _ => cut.to_string(),
            };
        } else {
            response = collapse_questions(&response);
            if response.chars().count() > LIMITS.response_max_chars {
                response = response
                    .chars()
                    .take(LIMITS.response_max_chars)
                    .collect::<String>()
                    .trim_end()
                    .to_string();
            }
        }
    }

    let micro_action = raw
        .get("micro_action")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().take(LIMITS.micro_action_max_chars).collect::<String>());

    DumpReply {
        response,
        detected_emotions: sanitize_emotions(raw.get("detected_emotions")),
        micro_action,
        should_end: raw.get("should_end").and_then(|v| v.as_bool()).unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_truncated_at_word_boundary() {
        let long = "palavra ".repeat(40); // 320 chars
        let sanitized = sanitize_structured(&json!({ "validation": long }));
        assert!(sanitized.validation.chars().count() <= LIMITS.validation_max_chars);
        assert!(!sanitized.validation.ends_with("palavr"), "mid-word cut");
    }

    #[test]
    fn test_missing_validation_defaults_to_ack() {
        let sanitized = sanitize_structured(&json!({}));
        assert_eq!(sanitized.validation, DEFAULT_ACK);
        let sanitized = sanitize_structured(&json!({ "validation": "   " }));
        assert_eq!(sanitized.validation, DEFAULT_ACK);
    }

    #[test]
    fn test_question_collapses_to_single_interrogative() {
        let sanitized = sanitize_structured(&json!({
            "validation": "Entendi.",
            "question": "O que pesou mais? E como você dormiu? E o trabalho?"
        }));
        let q = sanitized.question.unwrap();
        assert_eq!(q, "O que pesou mais?");
        assert_eq!(q.matches('?').count(), 1);
    }

    #[test]
    fn test_multiple_choice_question_is_not_cut() {
        let sanitized = sanitize_structured(&json!({
            "validation": "Entendi.",
            "question": "Qual bateu mais forte? A) cansado B) vazio?"
        }));
        assert_eq!(
            sanitized.question.as_deref(),
            Some("Qual bateu mais forte? A) cansado B) vazio?")
        );
    }

    #[test]
    fn test_question_without_interrogation_passes_through() {
        let sanitized = sanitize_structured(&json!({
            "validation": "Ok.",
            "question": "me conta mais sobre isso"
        }));
        assert_eq!(sanitized.question.as_deref(), Some("me conta mais sobre isso"));
    }

    #[test]
    fn test_question_length_cap() {
        let long_q = format!("{}?", "pergunta longa ".repeat(20));
        let sanitized = sanitize_structured(&json!({ "validation": "Ok.", "question": long_q }));
        assert!(sanitized.question.unwrap().chars().count() <= LIMITS.question_max_chars);
    }

    #[test]
    fn test_emotions_filtered_to_vocabulary_in_order() {
        let sanitized = sanitize_structured(&json!({
            "validation": "Ok.",
            "detected_emotions": ["raiva", "alegria", "tristeza"]
        }));
        assert_eq!(sanitized.detected_emotions, vec!["raiva", "tristeza"]);
    }

    #[test]
    fn test_emotions_capped_at_two() {
        let sanitized = sanitize_structured(&json!({
            "validation": "Ok.",
            "detected_emotions": ["raiva", "tristeza", "ansiedade"]
        }));
        assert_eq!(sanitized.detected_emotions.len(), 2);
    }

    #[test]
    fn test_emotions_closure_under_garbage() {
        let sanitized = sanitize_structured(&json!({
            "validation": "Ok.",
            "detected_emotions": ["ódio", 42, null, "EXAUSTÃO", {"x": 1}]
        }));
        for e in &sanitized.detected_emotions {
            assert!(EMOTION_ENUM.contains(&e.as_str()));
        }
        assert_eq!(sanitized.detected_emotions, vec!["exaustão"]);
    }

    #[test]
    fn test_assemble_is_space_joined_concatenation() {
        let r = StructuredResponse {
            validation: "Pesado isso.".to_string(),
            question: Some("O que mais quer tirar do peito?".to_string()),
            detected_emotions: vec![],
        };
        assert_eq!(assemble_message(&r), "Pesado isso. O que mais quer tirar do peito?");

        let r2 = StructuredResponse {
            validation: "Entendi.".to_string(),
            question: None,
            detected_emotions: vec![],
        };
        assert_eq!(assemble_message(&r2), "Entendi.");
    }

    #[test]
    fn test_fallback_truncates_raw_text() {
        let raw = "x".repeat(900);
        assert_eq!(fallback_reply(&raw).chars().count(), LIMITS.response_max_chars);
        assert_eq!(fallback_reply("   "), DEFAULT_ACK);
    }

    #[test]
    fn test_truncate_word_boundary_short_input_untouched() {
        assert_eq!(truncate_word_boundary("curto", 200), "curto");
    }

    #[test]
    fn test_truncate_hard_cut_when_no_late_space() {
        let no_spaces = "a".repeat(300);
        assert_eq!(truncate_word_boundary(&no_spaces, 200).chars().count(), 200);
    }

    #[test]
    fn test_freeform_reply_defaults() {
        let reply = sanitize_freeform(&json!({}));
        assert_eq!(reply.response, DEFAULT_ACK);
        assert!(reply.detected_emotions.is_empty());
        assert!(reply.micro_action.is_none());
        assert!(!reply.should_end);
    }

    #[test]
    fn test_freeform_long_reply_with_options_not_cut_at_question() {
        let options = format!(
            "Qual combina mais? A) {} B) {}",
            "cansado ".repeat(30),
            "vazio ".repeat(30)
        );
        let reply = sanitize_freeform(&json!({ "response": options }));
        assert!(reply.response.chars().count() <= LIMITS.response_max_chars);
        assert!(reply.response.contains("A)"), "options must survive truncation");
    }

    #[test]
    fn test_freeform_long_reply_cut_at_first_question() {
        let long = format!("Primeira pergunta? {}", "texto extra ".repeat(50));
        let reply = sanitize_freeform(&json!({ "response": long }));
        assert_eq!(reply.response, "Primeira pergunta?");
    }

    #[test]
    fn test_freeform_micro_action_capped() {
        let reply = sanitize_freeform(&json!({
            "response": "Ok.",
            "micro_action": "a".repeat(500)
        }));
        assert_eq!(reply.micro_action.unwrap().chars().count(), LIMITS.micro_action_max_chars);
    }
}
