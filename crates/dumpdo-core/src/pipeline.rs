//! Chat pipeline.
//!
//! One inbound message in, one outcome out. Risk assessment runs before
//! anything else; high and critical risk short-circuit to a scripted safety
//! response without touching the generative model. The history snapshot for
//! the provider is taken before the current message is persisted, so the
//! model never sees the message twice.

use crate::history::{build_history, MAX_HISTORY_MESSAGES};
use crate::prompts::{
    build_system_prompt, mode_transition_message, welcome_message, PromptContext,
    LISTEN_ONLY_PROMPT,
};
use crate::sanitize::{
    assemble_message, fallback_reply, sanitize_freeform, sanitize_structured, DumpReply,
    DEFAULT_ACK,
};
use crate::schema::gemini_response_schema;
use crate::session::{SessionStore, StoredMessage};
use chrono::Utc;
use dumpdo_common::{ChatMode, DumpError, Result};
use dumpdo_llm::{complete_with_retry, LlmBackend, LlmError, LlmRequest, Message, RetryPolicy};
use dumpdo_mindsafe::{assess_risk, RiskEventRecord, RiskLevel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Hard cap on a single inbound message.
pub const MAX_INPUT_CHARS: usize = 10_000;

#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub user_id: String,
    pub session_id: Option<Uuid>,
    pub message: String,
    pub mode: Option<ChatMode>,
    /// Explicit request to switch the session into `mode`.
    #[serde(default)]
    pub switch_mode: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub message: String,
    pub session_id: Uuid,
    pub mode: ChatMode,
    pub risk_level: RiskLevel,
    pub is_emergency_response: bool,
    pub tokens_used: TokenUsage,
}

pub struct ChatPipeline {
    backend: Arc<dyn LlmBackend>,
    store: Arc<dyn SessionStore>,
    retry: RetryPolicy,
}

impl ChatPipeline {
    pub fn new(backend: Arc<dyn LlmBackend>, store: Arc<dyn SessionStore>) -> Self {
        Self { backend, store, retry: RetryPolicy::default() }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Full session-backed flow for one message.
    pub async fn handle(&self, inbound: InboundMessage) -> Result<ChatOutcome> {
        let message = inbound.message.trim();
        if message.is_empty() {
            return Err(DumpError::InvalidInput("message must not be empty".into()));
        }
        if message.chars().count() > MAX_INPUT_CHARS {
            return Err(DumpError::InvalidInput(format!(
                "message exceeds {MAX_INPUT_CHARS} characters"
            )));
        }

        // Risk first. Nothing reaches the model before this runs.
        let assessment = assess_risk(message);

        let session = match inbound.session_id {
            Some(id) => self.store.get_session(id).await?,
            None => {
                let session = self
                    .store
                    .create_session(&inbound.user_id, inbound.mode.unwrap_or_default())
                    .await?;
                self.store
                    .append_message(
                        session.id,
                        StoredMessage::assistant(welcome_message(session.mode), session.mode),
                    )
                    .await?;
                session
            }
        };
        let mut mode = session.mode;

        // Explicit mode switch: persist the scripted transition and keep
        // going. The emergency gate still applies to the message that rode
        // along with the switch.
        if inbound.switch_mode {
            if let Some(target) = inbound.mode {
                if target != mode {
                    self.store.set_mode(session.id, target).await?;
                    if let Some(transition) = mode_transition_message(mode, target) {
                        self.store
                            .append_message(
                                session.id,
                                StoredMessage::assistant(transition, target),
                            )
                            .await?;
                    }
                    mode = target;
                }
            }
        }

        // Snapshot history before persisting the current message.
        let recent = self
            .store
            .recent_messages(session.id, MAX_HISTORY_MESSAGES)
            .await?;
        let history = build_history(&recent);

        self.store
            .append_message(
                session.id,
                StoredMessage::user(message, mode, assessment.risk_level),
            )
            .await?;

        let message_count = self.store.message_count(session.id).await?;
        let duration_minutes = (Utc::now() - session.created_at).num_minutes();
        if let Some(event) =
            RiskEventRecord::from_assessment(&assessment, Some(duration_minutes), Some(message_count))
        {
            event.log();
        }

        if assessment.requires_emergency_response {
            let script = assessment
                .emergency_response
                .clone()
                .unwrap_or_else(|| DEFAULT_ACK.to_string());
            let mut stored = StoredMessage::assistant(&script, mode);
            stored.is_emergency = true;
            self.store.append_message(session.id, stored).await?;
            self.store.set_emergency(session.id).await?;
            return Ok(ChatOutcome {
                message: script,
                session_id: session.id,
                mode,
                risk_level: assessment.risk_level,
                is_emergency_response: true,
                tokens_used: TokenUsage::default(),
            });
        }

        let ctx = PromptContext { previous_messages: history.len() };
        let mut messages = vec![Message::system(build_system_prompt(mode, &ctx))];
        messages.extend(history);
        messages.push(Message::user(message));

        let mut req = LlmRequest::new(messages);
        req.max_tokens = Some(1024);
        req.temperature = Some(0.7);
        if mode == ChatMode::Dump {
            req.response_schema = Some(gemini_response_schema());
        }

        let resp = complete_with_retry(self.backend.as_ref(), req, &self.retry)
            .await
            .map_err(map_llm_error)?;

        let reply = match mode {
            ChatMode::Dump => match serde_json::from_str::<serde_json::Value>(&resp.content) {
                Ok(value) => assemble_message(&sanitize_structured(&value)),
                Err(err) => {
                    tracing::warn!(error = %err, "structured reply was not valid JSON, degrading");
                    fallback_reply(&resp.content)
                }
            },
            ChatMode::Processar => {
                let trimmed = resp.content.trim();
                if trimmed.is_empty() {
                    DEFAULT_ACK.to_string()
                } else {
                    trimmed.to_string()
                }
            }
        };

        let mut stored = StoredMessage::assistant(&reply, mode);
        stored.tokens = resp.completion_tokens;
        stored.model = Some(resp.model.clone());
        self.store.append_message(session.id, stored).await?;

        Ok(ChatOutcome {
            message: reply,
            session_id: session.id,
            mode,
            risk_level: assessment.risk_level,
            is_emergency_response: false,
            tokens_used: TokenUsage {
                prompt_tokens: resp.prompt_tokens,
                completion_tokens: resp.completion_tokens,
            },
        })
    }

    /// Sessionless listen-only flow: caller supplies the history, nothing is
    /// persisted. Risk assessment still gates the model call.
    pub async fn handle_dump(&self, message: &str, history: Vec<Message>) -> Result<DumpReply> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DumpError::InvalidInput("message must not be empty".into()));
        }
        if message.chars().count() > MAX_INPUT_CHARS {
            return Err(DumpError::InvalidInput(format!(
                "message exceeds {MAX_INPUT_CHARS} characters"
            )));
        }

        let assessment = assess_risk(message);
        if let Some(event) = RiskEventRecord::from_assessment(&assessment, None, None) {
            event.log();
        }
        if assessment.requires_emergency_response {
            let script = assessment
                .emergency_response
                .clone()
                .unwrap_or_else(|| DEFAULT_ACK.to_string());
            return Ok(DumpReply {
                response: script,
                detected_emotions: Vec::new(),
                micro_action: None,
                should_end: false,
            });
        }

        let mut messages = vec![Message::system(LISTEN_ONLY_PROMPT)];
        let skip = history.len().saturating_sub(MAX_HISTORY_MESSAGES);
        messages.extend(history.into_iter().skip(skip));
        messages.push(Message::user(message));

        let mut req = LlmRequest::new(messages);
        req.max_tokens = Some(512);
        req.temperature = Some(0.7);

        let resp = complete_with_retry(self.backend.as_ref(), req, &self.retry)
            .await
            .map_err(map_llm_error)?;

        match serde_json::from_str::<serde_json::Value>(&resp.content) {
            Ok(value) => Ok(sanitize_freeform(&value)),
            Err(err) => {
                tracing::warn!(error = %err, "listen-only reply was not valid JSON, degrading");
                Ok(DumpReply {
                    response: fallback_reply(&resp.content),
                    detected_emotions: Vec::new(),
                    micro_action: None,
                    should_end: false,
                })
            }
        }
    }
}

fn map_llm_error(err: LlmError) -> DumpError {
    match err {
        LlmError::Timeout(secs) => DumpError::ProviderTimeout(secs),
        other => DumpError::Provider(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;
    use async_trait::async_trait;
    use dumpdo_llm::LlmResponse;

    struct EchoBackend;

    #[async_trait]
    impl LlmBackend for EchoBackend {
        async fn complete(&self, _req: LlmRequest) -> std::result::Result<LlmResponse, LlmError> {
            Ok(LlmResponse {
                content: r#"{"validation": "Entendi."}"#.to_string(),
                model: "echo".to_string(),
                prompt_tokens: 1,
                completion_tokens: 1,
            })
        }
        fn model_id(&self) -> &str {
            "echo"
        }
    }

    fn pipeline() -> ChatPipeline {
        ChatPipeline::new(Arc::new(EchoBackend), Arc::new(InMemorySessionStore::new()))
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected_before_anything_else() {
        let err = pipeline()
            .handle(InboundMessage {
                user_id: "u".into(),
                session_id: None,
                message: "   ".into(),
                mode: None,
                switch_mode: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DumpError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_oversize_message_is_rejected() {
        let err = pipeline()
            .handle(InboundMessage {
                user_id: "u".into(),
                session_id: None,
                message: "x".repeat(MAX_INPUT_CHARS + 1),
                mode: None,
                switch_mode: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DumpError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unknown_session_id_surfaces_not_found() {
        let err = pipeline()
            .handle(InboundMessage {
                user_id: "u".into(),
                session_id: Some(Uuid::new_v4()),
                message: "oi".into(),
                mode: None,
                switch_mode: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DumpError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_mode_switch_persists_transition_and_continues() {
        let store = Arc::new(InMemorySessionStore::new());
        let p = ChatPipeline::new(Arc::new(EchoBackend), store.clone());
        let first = p
            .handle(InboundMessage {
                user_id: "u".into(),
                session_id: None,
                message: "oi".into(),
                mode: Some(ChatMode::Dump),
                switch_mode: false,
            })
            .await
            .unwrap();

        let switched = p
            .handle(InboundMessage {
                user_id: "u".into(),
                session_id: Some(first.session_id),
                message: "quero organizar isso".into(),
                mode: Some(ChatMode::Processar),
                switch_mode: true,
            })
            .await
            .unwrap();
        assert_eq!(switched.mode, ChatMode::Processar);
        assert!(!switched.message.contains("🔄"), "reply is the model answer, not the transition");

        let session = store.get_session(first.session_id).await.unwrap();
        assert_eq!(session.mode, ChatMode::Processar);
        let messages = store.recent_messages(first.session_id, 10).await.unwrap();
        let transition = messages
            .iter()
            .find(|m| m.content.contains("🔄"))
            .expect("transition persisted in the session history");
        assert_eq!(transition.role, "assistant");
        assert_eq!(transition.mode, ChatMode::Processar);
    }

    #[tokio::test]
    async fn test_new_session_opens_with_welcome_message() {
        let store = Arc::new(InMemorySessionStore::new());
        let p = ChatPipeline::new(Arc::new(EchoBackend), store.clone());
        let outcome = p
            .handle(InboundMessage {
                user_id: "u".into(),
                session_id: None,
                message: "oi".into(),
                mode: Some(ChatMode::Dump),
                switch_mode: false,
            })
            .await
            .unwrap();

        let messages = store.recent_messages(outcome.session_id, 10).await.unwrap();
        assert_eq!(messages[0].role, "assistant");
        assert!(messages[0].content.contains("O que precisa sair?"));
    }
}
