use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use super::bridge::ChatBridge;
use super::dto::{ChatReply, ChatRequest, ErrorResponse};
use crate::error::RelayError;

pub fn router(bridge: Arc<ChatBridge>) -> Router {
    Router::new()
        .route("/api/chat", post(handle_chat))
        .route("/api/health", get(handle_health))
        .with_state(bridge)
}

pub(crate) async fn handle_chat(
    State(bridge): State<Arc<ChatBridge>>,
    body: Bytes,
) -> Result<Json<ChatReply>, (StatusCode, Json<ErrorResponse>)> {
    // Missing content type, empty and malformed bodies all read as no message
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    let message = match request.message {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    if message.is_empty() {
        return Err(error_body(StatusCode::BAD_REQUEST, "Missing message"));
    }

    match bridge.reply(&message).await {
        Ok(reply) => Ok(Json(ChatReply { reply })),
        Err(err) => Err(map_error(err)),
    }
}

async fn handle_health() -> &'static str {
    "OK"
}

pub(crate) fn map_error(err: RelayError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        RelayError::UpstreamFailure { status, body } => {
            tracing::error!("Completion API call failed with status {}", status);
            let body = ErrorResponse {
                error: "Completion API call failed".to_string(),
                upstream_status: Some(status),
                upstream_body: Some(body),
            };
            (StatusCode::BAD_GATEWAY, Json(body))
        }
        RelayError::NetworkError(e) => {
            tracing::error!("Completion API unreachable: {}", e);
            error_body(StatusCode::BAD_GATEWAY, "Completion API call failed")
        }
        other => {
            tracing::error!("Chat request failed: {}", other);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    let body = ErrorResponse {
        error: message.to_string(),
        upstream_status: None,
        upstream_body: None,
    };
    (status, Json(body))
}
