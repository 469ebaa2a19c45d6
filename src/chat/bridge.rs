use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::{json, Value};

use super::dto::{CompletionRequest, InputMessage, McpToolSpec};
use super::extract::extract_reply;
use crate::config::{ChatConfig, RelayConfig};
use crate::error::{RelayError, Result};

/// Sends user messages to the completion API with the gateway advertised as
/// an MCP tool source.
#[derive(Clone)]
pub struct ChatBridge {
    http: reqwest::Client,
    config: ChatConfig,
    gateway_secret: Option<String>,
}

impl ChatBridge {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.chat.request_timeout_secs))
            .user_agent(concat!("Relay-MCP/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::config_error(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            config: config.chat.clone(),
            gateway_secret: config.auth.shared_secret.clone(),
        })
    }

    pub fn build_request(&self, message: &str) -> CompletionRequest {
        let tools = match &self.config.mcp_server_url {
            Some(url) => {
                let mut headers = BTreeMap::new();
                if let Some(secret) = &self.gateway_secret {
                    headers.insert("Authorization".to_string(), format!("Bearer {}", secret));
                }
                vec![McpToolSpec {
                    kind: "mcp".to_string(),
                    server_label: self.config.server_label.clone(),
                    server_url: url.clone(),
                    require_approval: "never".to_string(),
                    headers,
                    allowed_tools: self.config.allowed_tools.clone(),
                }]
            }
            None => Vec::new(),
        };

        CompletionRequest {
            model: self.config.model.clone(),
            input: vec![
                InputMessage {
                    role: "system".to_string(),
                    content: self.config.system_prompt.clone(),
                },
                InputMessage {
                    role: "user".to_string(),
                    content: message.to_string(),
                },
            ],
            tools,
        }
    }

    /// Raw completion API payload. Non-JSON bodies come back as `{"raw": ...}`.
    pub async fn complete(&self, message: &str) -> Result<Value> {
        let url = format!("{}/responses", self.config.api_base_url.trim_end_matches('/'));
        let mut req = self.http.post(&url).json(&self.build_request(message));
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        let body = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| json!({ "raw": text }));

        tracing::info!("[/responses] status {}", status.as_u16());
        tracing::debug!("[/responses] body {}", body);

        if !status.is_success() {
            return Err(RelayError::UpstreamFailure {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    pub async fn reply(&self, message: &str) -> Result<String> {
        let body = self.complete(message).await?;
        Ok(extract_reply(&body))
    }
}
