use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use super::dto::{McpRequest, McpResponse, Method, ToolCall, PROTOCOL_VERSION};
use crate::error::{RelayError, Result};
use crate::registry::ToolRegistry;
use crate::tools::ToolResult;

#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Routes protocol messages against a read-only registry. Holds no per-request
/// state, so one instance serves any number of concurrent dispatches.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
    tool_timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, info: ServerInfo, tool_timeout: Duration) -> Self {
        Self {
            registry,
            info,
            tool_timeout,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, request: McpRequest, authenticated: bool) -> McpResponse {
        if !authenticated {
            return McpResponse::from_error(request.id, &RelayError::Unauthorized);
        }

        match Method::classify(&request.method) {
            Method::Initialize => McpResponse::success(request.id, self.handshake()),
            Method::ListTools => McpResponse::success(
                request.id,
                json!({
                    "tools": self.registry.tools()
                }),
            ),
            Method::CallTool => {
                let call = match ToolCall::from_params(request.params.as_ref()) {
                    Ok(call) => call,
                    Err(err) => return McpResponse::from_error(request.id, &err),
                };
                let name = call.name.clone();
                match self.call_tool(call).await.and_then(to_result_value) {
                    Ok(result) => McpResponse::success(request.id, result),
                    Err(err @ RelayError::ToolNotFound { .. }) => {
                        tracing::warn!("Tool not found: {}", name);
                        McpResponse::from_error(request.id, &err)
                            .with_data(json!({ "available": self.registry.names() }))
                    }
                    Err(err) => {
                        tracing::error!("Tool {} failed: {}", name, err);
                        McpResponse::from_error(request.id, &err)
                    }
                }
            }
            Method::Unknown => {
                tracing::warn!("Unsupported method: {:?}", request.method);
                let err = RelayError::unknown_method(request.method.as_str());
                McpResponse::from_error(request.id, &err)
                    .with_data(json!({ "got": request.method }))
            }
        }
    }

    fn handshake(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": { "name": self.info.name, "version": self.info.version }
        })
    }

    async fn call_tool(&self, call: ToolCall) -> Result<ToolResult> {
        tracing::info!("Handling tool call: {}", call.name);

        if self.registry.get(&call.name).is_none() {
            return Err(RelayError::tool_not_found(call.name));
        }
        let handler = self
            .registry
            .handler(&call.name)
            .ok_or_else(|| RelayError::ToolUnavailable {
                name: call.name.clone(),
            })?;

        match tokio::time::timeout(self.tool_timeout, handler.call(call.arguments)).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::ToolTimeout {
                name: call.name,
                seconds: self.tool_timeout.as_secs(),
            }),
        }
    }
}

fn to_result_value(result: ToolResult) -> Result<Value> {
    serde_json::to_value(result).map_err(|e| RelayError::internal(e.to_string()))
}
