//! HTTP-level tests over the full router with a mock provider backend.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use dumpdo_core::{ChatPipeline, InMemorySessionStore};
use dumpdo_llm::{LlmBackend, LlmError, LlmRequest, LlmResponse};
use dumpdo_web::rate_limit::RateLimiter;
use dumpdo_web::router::build_router;
use dumpdo_web::state::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct CannedBackend(String);

#[async_trait]
impl LlmBackend for CannedBackend {
    async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
        Ok(LlmResponse {
            content: self.0.clone(),
            model: "canned".to_string(),
            prompt_tokens: 1,
            completion_tokens: 1,
        })
    }
    fn model_id(&self) -> &str {
        "canned"
    }
}

fn test_state(reply: &str, auth_token: Option<&str>, rate_limit: u32) -> AppState {
    AppState {
        pipeline: ChatPipeline::new(
            Arc::new(CannedBackend(reply.to_string())),
            Arc::new(InMemorySessionStore::new()),
        ),
        rate_limiter: RateLimiter::new(rate_limit, Duration::from_secs(60)),
        auth_token: auth_token.map(String::from),
    }
}

async fn post_json(app: axum::Router, path: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let response = app
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn test_health_is_open() {
    let app = build_router(test_state(r#"{"validation": "Ok."}"#, Some("secret"), 20));
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_chat_happy_path() {
    let app = build_router(test_state(
        r#"{"validation": "Pesado isso.", "detected_emotions": ["exaustão"]}"#,
        None,
        20,
    ));
    let (status, body) = post_json(app, "/api/chat", json!({"message": "semana puxada"}), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Pesado isso.");
    assert_eq!(body["riskLevel"], "none");
    assert_eq!(body["isEmergencyResponse"], false);
    assert!(body["sessionId"].is_string());
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let app = build_router(test_state(r#"{"validation": "Ok."}"#, None, 20));
    let (status, _) = post_json(app, "/api/chat", json!({"message": "   "}), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_requires_token_when_configured() {
    let state = test_state(r#"{"validation": "Ok."}"#, Some("secret"), 20);
    let app = build_router(state);

    let (status, _) = post_json(app.clone(), "/api/chat", json!({"message": "oi"}), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post_json(app.clone(), "/api/chat", json!({"message": "oi"}), Some("wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post_json(app, "/api/chat", json!({"message": "oi"}), Some("secret")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_chat_rate_limit_returns_429() {
    let app = build_router(test_state(r#"{"validation": "Ok."}"#, None, 2));
    let body = json!({"message": "oi", "userId": "u1"});
    let (s1, _) = post_json(app.clone(), "/api/chat", body.clone(), None).await;
    let (s2, _) = post_json(app.clone(), "/api/chat", body.clone(), None).await;
    let (s3, _) = post_json(app, "/api/chat", body, None).await;
    assert_eq!(s1, StatusCode::OK);
    assert_eq!(s2, StatusCode::OK);
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_chat_emergency_shape() {
    let app = build_router(test_state(r#"{"validation": "nunca"}"#, None, 20));
    let (status, body) = post_json(
        app,
        "/api/chat",
        json!({"message": "quero morrer, não aguento mais"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isEmergencyResponse"], true);
    assert_eq!(body["riskLevel"], "critical");
    assert!(body["response"].as_str().unwrap().contains("188"));
}

#[tokio::test]
async fn test_dump_endpoint_returns_sanitized_reply() {
    let app = build_router(test_state(
        r#"{"response": "Tá pesado. Quer desabafar mais?", "detected_emotions": ["exaustão"], "should_end": false}"#,
        None,
        20,
    ));
    let (status, body) = post_json(
        app,
        "/api/dump",
        json!({
            "message": "tudo acumulando",
            "history": [{"role": "user", "content": "oi"}, {"role": "assistant", "content": "Entendi."}]
        }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Tá pesado. Quer desabafar mais?");
    assert_eq!(body["detected_emotions"][0], "exaustão");
    assert_eq!(body["should_end"], false);
}

#[tokio::test]
async fn test_assess_endpoint_classifies_without_model() {
    let app = build_router(test_state("irrelevant", None, 20));
    let (status, body) = post_json(
        app,
        "/api/assess",
        json!({"message": "tive um ataque de pânico agora"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_level"], "high");
    assert_eq!(body["requires_emergency_response"], true);
}
