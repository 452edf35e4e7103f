//! Session persistence seam.
//!
//! The pipeline talks to a [`SessionStore`] trait; the in-memory
//! implementation backs tests and single-instance deployments. Messages are
//! append-only per session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dumpdo_common::{ChatMode, DumpError, Result};
use dumpdo_mindsafe::RiskLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: String,
    pub mode: ChatMode,
    pub emergency_triggered: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
    pub mode: ChatMode,
    pub risk_level: Option<RiskLevel>,
    pub is_emergency: bool,
    pub tokens: u32,
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    pub fn user(content: impl Into<String>, mode: ChatMode, risk_level: RiskLevel) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            mode,
            risk_level: Some(risk_level),
            is_emergency: false,
            tokens: 0,
            model: None,
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, mode: ChatMode) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            mode,
            risk_level: None,
            is_emergency: false,
            tokens: 0,
            model: None,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, user_id: &str, mode: ChatMode) -> Result<Session>;
    async fn get_session(&self, id: Uuid) -> Result<Session>;
    async fn set_mode(&self, id: Uuid, mode: ChatMode) -> Result<()>;
    async fn set_emergency(&self, id: Uuid) -> Result<()>;
    async fn append_message(&self, id: Uuid, message: StoredMessage) -> Result<()>;
    /// Most recent messages in chronological order, capped at `limit`.
    async fn recent_messages(&self, id: Uuid, limit: usize) -> Result<Vec<StoredMessage>>;
    async fn message_count(&self, id: Uuid) -> Result<usize>;
}

struct SessionEntry {
    session: Session,
    messages: Vec<StoredMessage>,
}

/// HashMap-backed store. State is lost on restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self, user_id: &str, mode: ChatMode) -> Result<Session> {
        let session = Session {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            mode,
            emergency_triggered: false,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.insert(
            session.id,
            SessionEntry { session: session.clone(), messages: Vec::new() },
        );
        Ok(session)
    }

    async fn get_session(&self, id: Uuid) -> Result<Session> {
        let inner = self.inner.read().await;
        inner
            .get(&id)
            .map(|e| e.session.clone())
            .ok_or_else(|| DumpError::SessionNotFound(id.to_string()))
    }

    async fn set_mode(&self, id: Uuid, mode: ChatMode) -> Result<()> {
        let mut inner = self.inner.write().await;
        let entry = inner.get_mut(&id).ok_or_else(|| DumpError::SessionNotFound(id.to_string()))?;
        entry.session.mode = mode;
        Ok(())
    }

    async fn set_emergency(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let entry = inner.get_mut(&id).ok_or_else(|| DumpError::SessionNotFound(id.to_string()))?;
        entry.session.emergency_triggered = true;
        Ok(())
    }

    async fn append_message(&self, id: Uuid, message: StoredMessage) -> Result<()> {
        let mut inner = self.inner.write().await;
        let entry = inner.get_mut(&id).ok_or_else(|| DumpError::SessionNotFound(id.to_string()))?;
        entry.messages.push(message);
        Ok(())
    }

    async fn recent_messages(&self, id: Uuid, limit: usize) -> Result<Vec<StoredMessage>> {
        let inner = self.inner.read().await;
        let entry = inner.get(&id).ok_or_else(|| DumpError::SessionNotFound(id.to_string()))?;
        let start = entry.messages.len().saturating_sub(limit);
        Ok(entry.messages[start..].to_vec())
    }

    async fn message_count(&self, id: Uuid) -> Result<usize> {
        let inner = self.inner.read().await;
        let entry = inner.get(&id).ok_or_else(|| DumpError::SessionNotFound(id.to_string()))?;
        Ok(entry.messages.len())
    }
}
