use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_body: Option<serde_json::Value>,
}

/// Request body for the completion API's `/responses` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<McpToolSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMessage {
    pub role: String,
    pub content: String,
}

/// Advertises the gateway as a remote tool source.
#[derive(Clone, Serialize, Deserialize)]
pub struct McpToolSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub server_label: String,
    pub server_url: String,
    pub require_approval: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,
}

impl std::fmt::Debug for McpToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&String> = self.headers.keys().collect();
        f.debug_struct("McpToolSpec")
            .field("kind", &self.kind)
            .field("server_label", &self.server_label)
            .field("server_url", &self.server_url)
            .field("require_approval", &self.require_approval)
            .field("headers", &header_names)
            .field("allowed_tools", &self.allowed_tools)
            .finish()
    }
}
