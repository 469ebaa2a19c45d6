//! Wire-shape adapter.
//!
//! Older clients send `{"type": "mcp/call_tool", "tool_name": ..., "arguments": ...}`
//! instead of a JSON-RPC envelope. Both shapes are folded into [`McpRequest`]
//! so the dispatcher only ever sees one message type:
//!
//! | legacy `type`      | JSON-RPC `method` |
//! |--------------------|-------------------|
//! | `mcp/handshake`    | `initialize`      |
//! | `mcp/list_tools`   | `tools/list`      |
//! | `mcp/call_tool`    | `tools/call`, `params = {name: tool_name, arguments}` |
//!
//! Responses always use the JSON-RPC envelope.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::dto::{McpRequest, Method};
use crate::error::{RelayError, Result};

#[derive(Debug, Deserialize)]
struct LegacyMessage {
    #[serde(rename = "type")]
    kind: String,
    tool_name: Option<Value>,
    arguments: Option<Value>,
}

/// The correlation id of a raw message, if it carried one.
pub fn correlation_id(message: &Value) -> Option<Value> {
    message.get("id").cloned()
}

pub fn normalize(message: Value) -> Result<McpRequest> {
    let object = match message.as_object() {
        Some(object) => object,
        None => {
            return Err(RelayError::InvalidRequest(
                "message must be a JSON object".to_string(),
            ))
        }
    };

    if object.contains_key("method") {
        return serde_json::from_value(message)
            .map_err(|e| RelayError::InvalidRequest(e.to_string()));
    }

    let id = correlation_id(&message);
    if object.get("type").map_or(false, Value::is_string) {
        let legacy: LegacyMessage = serde_json::from_value(message)
            .map_err(|e| RelayError::InvalidRequest(e.to_string()))?;
        return Ok(from_legacy(id, legacy));
    }

    // No discriminant at all; dispatch reports it as an unsupported method
    Ok(McpRequest::new(id, "", None))
}

fn from_legacy(id: Option<Value>, legacy: LegacyMessage) -> McpRequest {
    let params = match Method::classify(&legacy.kind) {
        Method::CallTool => {
            let mut params = Map::new();
            if let Some(name) = legacy.tool_name {
                params.insert("name".to_string(), name);
            }
            if let Some(arguments) = legacy.arguments {
                params.insert("arguments".to_string(), arguments);
            }
            Some(Value::Object(params))
        }
        _ => None,
    };
    McpRequest::new(id, legacy.kind, params)
}
