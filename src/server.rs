use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::auth::SharedSecretAuth;
use crate::config::RelayConfig;
use crate::error::{codes, RelayError};
use crate::mcp::{legacy, Dispatcher, McpRequest, McpResponse, ServerInfo};
use crate::registry::{ToolDescriptor, ToolRegistry};

/// The gateway: auth gate in front of the protocol dispatcher.
pub struct RelayServer {
    config: RelayConfig,
    auth: SharedSecretAuth,
    dispatcher: Dispatcher,
}

impl RelayServer {
    pub fn new(config: RelayConfig, registry: ToolRegistry) -> Self {
        let auth = SharedSecretAuth::new(&config.auth);
        let info = ServerInfo {
            name: config.server.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            info,
            Duration::from_secs(config.registry.tool_timeout_secs),
        );
        Self {
            config,
            auth,
            dispatcher,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn auth(&self) -> &SharedSecretAuth {
        &self.auth
    }

    pub fn get_tools(&self) -> &[ToolDescriptor] {
        self.dispatcher.registry().tools()
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.config.server.heartbeat_secs)
    }

    pub async fn handle_request(&self, request: McpRequest, credential: Option<&str>) -> McpResponse {
        let authenticated = self.auth.validate(credential);
        self.dispatcher.dispatch(request, authenticated).await
    }

    /// Entry point for raw bodies in either wire shape.
    pub async fn handle_message(&self, body: &[u8], credential: Option<&str>) -> McpResponse {
        let authenticated = self.auth.validate(credential);

        let message: Value = match serde_json::from_slice(body) {
            Ok(message) => message,
            Err(e) if authenticated => {
                tracing::error!("Failed to parse request: {}", e);
                return McpResponse::error(None, codes::PARSE_ERROR, "Parse error")
                    .with_data(serde_json::json!({ "details": e.to_string() }));
            }
            Err(_) => return McpResponse::from_error(None, &RelayError::Unauthorized),
        };

        let id = legacy::correlation_id(&message);
        match legacy::normalize(message) {
            Ok(request) => self.dispatcher.dispatch(request, authenticated).await,
            Err(_) if !authenticated => McpResponse::from_error(id, &RelayError::Unauthorized),
            Err(err) => McpResponse::from_error(id, &err),
        }
    }
}
