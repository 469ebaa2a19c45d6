use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{redacted_headers, AUTHORIZATION_HEADER};
use crate::error::status_for_code;
use crate::server::RelayServer;
use crate::sse;

#[derive(Clone)]
pub struct AppState {
    server: Arc<RelayServer>,
}

pub fn router(server: Arc<RelayServer>) -> Router {
    let enable_cors = server.config().server.enable_cors;
    let state = AppState { server };

    let mut app = Router::new()
        .route("/", get(handle_root).post(handle_rpc))
        .route("/health", get(handle_health))
        .fallback(handle_unmatched)
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }
    app
}

pub async fn run_http_server(server: RelayServer) -> Result<()> {
    let host = server.config().server.host.clone();
    let port = server.config().server.port;
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", host, port))?;

    let app = router(Arc::new(server));

    tracing::info!("Starting HTTP MCP gateway on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn log_requests(request: Request, next: Next) -> Response {
    tracing::info!(
        "{} {} {:?}",
        request.method(),
        request.uri(),
        redacted_headers(request.headers())
    );
    next.run(request).await
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "version": env!("CARGO_PKG_VERSION") }))
}

async fn handle_root(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let wants_stream = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |accept| accept.contains("text/event-stream"));

    if wants_stream {
        sse::channel(state.server.heartbeat_interval()).into_response()
    } else {
        "OK".into_response()
    }
}

async fn handle_rpc(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    tracing::debug!("body: {}", String::from_utf8_lossy(&body));

    let credential = headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|value| value.to_str().ok());
    let response = state.server.handle_message(&body, credential).await;

    let status = match &response.error {
        Some(error) => status_for_code(error.code),
        None => StatusCode::OK,
    };
    if let Ok(rendered) = serde_json::to_string(&response) {
        tracing::debug!("response {}: {}", status.as_u16(), rendered);
    }
    (status, Json(response)).into_response()
}

async fn handle_unmatched(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::warn!("Unmatched route: {} {}", method, uri);
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}
