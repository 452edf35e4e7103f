//! Standalone risk-assessment endpoint (no model call, no persistence).

use super::{require_auth, ApiError};
use crate::state::SharedState;
use axum::extract::{Json, State};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use dumpdo_mindsafe::{assess_risk, RiskAssessment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub message: String,
}

pub async fn assess_submit(
    State(state): State<SharedState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(payload): Json<AssessRequest>,
) -> Result<Json<RiskAssessment>, ApiError> {
    require_auth(&state, &auth)?;
    Ok(Json(assess_risk(&payload.message)))
}
