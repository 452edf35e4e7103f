//! Session-backed chat endpoint.

use super::{error_body, error_response, require_auth, ApiError};
use crate::state::SharedState;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use dumpdo_common::ChatMode;
use dumpdo_core::{InboundMessage, TokenUsage};
use dumpdo_mindsafe::RiskLevel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub mode: Option<ChatMode>,
    #[serde(default)]
    pub switch_mode: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub session_id: Uuid,
    pub mode: ChatMode,
    pub risk_level: RiskLevel,
    pub is_emergency_response: bool,
    pub tokens_used: TokenUsage,
}

pub async fn chat_submit(
    State(state): State<SharedState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    require_auth(&state, &auth)?;

    let user_id = payload.user_id.unwrap_or_else(|| "anonymous".to_string());
    if !state.rate_limiter.check(&user_id) {
        return Err((StatusCode::TOO_MANY_REQUESTS, error_body("rate limit exceeded")));
    }

    let outcome = state
        .pipeline
        .handle(InboundMessage {
            user_id,
            session_id: payload.session_id,
            message: payload.message,
            mode: payload.mode,
            switch_mode: payload.switch_mode,
        })
        .await
        .map_err(error_response)?;

    Ok(Json(ChatResponse {
        response: outcome.message,
        session_id: outcome.session_id,
        mode: outcome.mode,
        risk_level: outcome.risk_level,
        is_emergency_response: outcome.is_emergency_response,
        tokens_used: outcome.tokens_used,
    }))
}
