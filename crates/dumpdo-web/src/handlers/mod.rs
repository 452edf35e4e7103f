//! HTTP handlers.

pub mod assess;
pub mod chat;
pub mod dump;
pub mod health;

use crate::state::SharedState;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use dumpdo_common::DumpError;
use serde_json::{json, Value};

pub(crate) type ApiError = (StatusCode, Json<Value>);

pub(crate) fn error_body(message: &str) -> Json<Value> {
    Json(json!({ "error": message }))
}

/// Map pipeline errors to HTTP status codes. Provider failures never leak
/// upstream details to the client.
pub(crate) fn error_response(err: DumpError) -> ApiError {
    let status = match &err {
        DumpError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DumpError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        DumpError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        DumpError::ProviderTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        DumpError::Provider(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
        (status, error_body("internal error"))
    } else {
        (status, error_body(&err.to_string()))
    }
}

/// Bearer-token check. Auth is disabled when no token is configured.
pub(crate) fn require_auth(
    state: &SharedState,
    auth: &Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<(), ApiError> {
    let Some(expected) = &state.auth_token else {
        return Ok(());
    };
    match auth {
        Some(TypedHeader(header)) if header.token() == expected => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, error_body("invalid or missing token"))),
    }
}
