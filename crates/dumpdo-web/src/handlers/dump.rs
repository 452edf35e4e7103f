//! Sessionless listen-only endpoint. The client owns the history.

use super::{error_body, error_response, require_auth, ApiError};
use crate::state::SharedState;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use dumpdo_core::DumpReply;
use dumpdo_llm::Message;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DumpRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryItem {
    /// "user" or "assistant"; anything else is treated as user.
    pub role: String,
    pub content: String,
}

pub async fn dump_submit(
    State(state): State<SharedState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(payload): Json<DumpRequest>,
) -> Result<Json<DumpReply>, ApiError> {
    require_auth(&state, &auth)?;

    let user_id = payload.user_id.as_deref().unwrap_or("anonymous");
    if !state.rate_limiter.check(user_id) {
        return Err((StatusCode::TOO_MANY_REQUESTS, error_body("rate limit exceeded")));
    }

    let history: Vec<Message> = payload
        .history
        .iter()
        .map(|item| match item.role.as_str() {
            "assistant" => Message::assistant(&item.content),
            _ => Message::user(&item.content),
        })
        .collect();

    let reply = state
        .pipeline
        .handle_dump(&payload.message, history)
        .await
        .map_err(error_response)?;

    Ok(Json(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_defaults_to_empty() {
        let req: DumpRequest = serde_json::from_str(r#"{"message": "tudo pesado"}"#).unwrap();
        assert!(req.history.is_empty());
    }

    #[test]
    fn test_history_items_deserialize() {
        let req: DumpRequest = serde_json::from_str(
            r#"{"message": "oi", "history": [{"role": "assistant", "content": "Entendi."}]}"#,
        )
        .unwrap();
        assert_eq!(req.history[0].role, "assistant");
    }
}
