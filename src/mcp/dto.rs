use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{RelayError, Result};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    #[serde(default = "jsonrpc_version")]
    pub jsonrpc: String,
    /// `None` when the caller sent no id; `Some(Value::Null)` for an explicit null.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl McpRequest {
    pub fn new(id: Option<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id,
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    pub fn from_error(id: Option<Value>, err: &RelayError) -> Self {
        Self::error(id, err.rpc_code(), err.to_string())
    }

    pub fn with_data(mut self, data: Value) -> Self {
        if let Some(error) = self.error.as_mut() {
            error.data = Some(data);
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Protocol operations, after folding the legacy and JSON-RPC spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    ListTools,
    CallTool,
    Unknown,
}

impl Method {
    pub fn classify(method: &str) -> Self {
        match method {
            "initialize" | "handshake" | "mcp/handshake" => Method::Initialize,
            "tools/list" | "list_tools" | "mcp/list_tools" => Method::ListTools,
            "tools/call" | "call_tool" | "mcp/call_tool" => Method::CallTool,
            _ => Method::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    /// Presence checks only: a string `name`, and `arguments` that is either
    /// absent or a mapping. Argument fields are passed through untouched.
    pub fn from_params(params: Option<&Value>) -> Result<Self> {
        let params = match params {
            Some(Value::Object(map)) => map,
            _ => return Err(RelayError::invalid_params("Missing parameters")),
        };
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RelayError::invalid_params("Missing tool name"))?
            .to_string();
        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(RelayError::invalid_params("arguments must be an object")),
        };
        Ok(Self { name, arguments })
    }
}

fn jsonrpc_version() -> String {
    JSONRPC_VERSION.to_string()
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
