use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use relay_mcp::registry::ToolRegistry;
use relay_mcp::tools::SequentialIds;
use relay_mcp::{http, RelayConfig, RelayServer};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(secret: Option<&str>) -> Router {
    let mut config = RelayConfig::default();
    config.auth.shared_secret = secret.map(str::to_string);
    let registry = ToolRegistry::load(Vec::new()).with_builtin_handlers(Arc::new(SequentialIds::new()));
    http::router(Arc::new(RelayServer::new(config, registry)))
}

fn rpc(body: Value, credential: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(credential) = credential {
        builder = builder.header(header::AUTHORIZATION, credential);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_reports_version() {
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(Some("s3cr3t")), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "version": env!("CARGO_PKG_VERSION") }));
}

#[tokio::test]
async fn root_without_event_stream_is_plain_ok() {
    let req = Request::get("/").body(Body::empty()).unwrap();
    let resp = app(None).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn root_with_event_stream_opens_channel() {
    let req = Request::get("/")
        .header(header::ACCEPT, "text/event-stream")
        .body(Body::empty())
        .unwrap();
    let resp = app(None).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));
}

#[tokio::test]
async fn status_codes_follow_error_kind() {
    let (status, body) = send(app(None), rpc(json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert!(body.get("error").is_none());

    let (status, body) = send(
        app(None),
        rpc(
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": { "name": "unknown.tool" } }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]["message"].as_str().unwrap().contains("unknown.tool"));
    assert!(body.get("result").is_none());

    let (status, body) = send(app(None), rpc(json!({ "jsonrpc": "2.0", "id": 3, "method": "bogus" }), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["id"], 3);

    let req = Request::post("/").body(Body::from("{oops")).unwrap();
    let (status, _) = send(app(None), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn shared_secret_gates_every_message() {
    let message = json!({ "jsonrpc": "2.0", "id": "a", "method": "initialize" });

    let (status, body) = send(app(Some("s3cr3t")), rpc(message.clone(), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["id"], "a");

    let (status, _) = send(app(Some("s3cr3t")), rpc(message.clone(), Some("Bearer wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(app(Some("s3cr3t")), rpc(message, Some("Bearer s3cr3t"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["serverInfo"]["name"], "relay-mcp");

    let req = Request::post("/")
        .body(Body::from("{oops"))
        .unwrap();
    let (status, _) = send(app(Some("s3cr3t")), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn legacy_call_over_http() {
    let (status, body) = send(
        app(None),
        rpc(
            json!({
                "type": "mcp/call_tool",
                "tool_name": "gmail.create_draft",
                "arguments": { "to": "x@y.z", "subject": "s", "body": "b" }
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["content"][0]["data"]["draftId"], "dr_1");
    assert_eq!(body["result"]["content"][0]["data"]["subject"], "s");
}

#[tokio::test]
async fn unmatched_routes_are_not_found() {
    let req = Request::get("/nope").body(Body::empty()).unwrap();
    let (status, body) = send(app(None), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not Found" }));
}
