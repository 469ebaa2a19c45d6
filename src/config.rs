use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub registry: RegistryConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub enable_cors: bool,
    pub heartbeat_secs: u64,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    // Callers must present `Authorization: Bearer <shared_secret>` when set
    pub shared_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub connectors_dir: PathBuf,
    pub tool_timeout_secs: u64,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub port: u16,
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub system_prompt: String,
    pub mcp_server_url: Option<String>,
    pub server_label: String,
    pub allowed_tools: Vec<String>,
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "shared_secret",
                &self.shared_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("port", &self.port)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("mcp_server_url", &self.mcp_server_url)
            .field("server_label", &self.server_label)
            .field("allowed_tools", &self.allowed_tools)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "relay-mcp".to_string(),
                host: "0.0.0.0".to_string(),
                port: 4000,
                log_level: "info".to_string(),
                enable_cors: true,
                heartbeat_secs: 15,
            },
            auth: AuthConfig::default(),
            registry: RegistryConfig {
                connectors_dir: PathBuf::from("connectors"),
                tool_timeout_secs: 30,
            },
            chat: ChatConfig {
                port: 3000,
                api_base_url: "https://api.openai.com/v1".to_string(),
                api_key: None,
                model: "gpt-4o-mini".to_string(),
                system_prompt: "You are a helpful assistant. Use tools when helpful.".to_string(),
                mcp_server_url: None,
                server_label: "relay-mcp".to_string(),
                allowed_tools: vec!["gmail.create_draft".to_string()],
                request_timeout_secs: 60,
            },
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Server
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| RelayError::config_error("Invalid PORT"))?;
        }
        if let Ok(host) = std::env::var("MCP_HOST") {
            config.server.host = host;
        }
        if let Ok(log_level) = std::env::var("MCP_LOG_LEVEL") {
            config.server.log_level = log_level;
        }
        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            if !name.trim().is_empty() {
                config.server.name = name;
            }
        }
        if let Ok(enabled) = std::env::var("MCP_ENABLE_CORS") {
            config.server.enable_cors = parse_flag(&enabled);
        }
        if let Ok(secs) = std::env::var("MCP_HEARTBEAT_SECS") {
            config.server.heartbeat_secs = parse_secs("MCP_HEARTBEAT_SECS", &secs)?;
        }

        // Auth configuration
        config.auth.shared_secret = std::env::var("MCP_SHARED_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        // Registry
        if let Ok(dir) = std::env::var("MCP_CONNECTORS_DIR") {
            config.registry.connectors_dir = PathBuf::from(dir);
        }
        if let Ok(secs) = std::env::var("MCP_TOOL_TIMEOUT_SECS") {
            config.registry.tool_timeout_secs = parse_secs("MCP_TOOL_TIMEOUT_SECS", &secs)?;
        }

        // Chat bridge
        if let Ok(port) = std::env::var("CHAT_PORT") {
            config.chat.port = port
                .parse()
                .map_err(|_| RelayError::config_error("Invalid CHAT_PORT"))?;
        }
        config.chat.api_key = std::env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty());
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.chat.api_base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.chat.model = model;
        }
        if let Ok(prompt) = std::env::var("CHAT_SYSTEM_PROMPT") {
            config.chat.system_prompt = prompt;
        }
        config.chat.mcp_server_url = std::env::var("MCP_SERVER_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        if let Ok(label) = std::env::var("MCP_SERVER_LABEL") {
            config.chat.server_label = label;
        }
        if let Ok(tools) = std::env::var("MCP_ALLOWED_TOOLS") {
            config.chat.allowed_tools = tools
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(secs) = std::env::var("CHAT_REQUEST_TIMEOUT_SECS") {
            config.chat.request_timeout_secs = parse_secs("CHAT_REQUEST_TIMEOUT_SECS", &secs)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RelayError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: RelayConfig = toml::from_str(&content)
            .map_err(|e| RelayError::config_error(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Durations feed timers that reject a zero period.
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("server.heartbeat_secs", self.server.heartbeat_secs),
            ("registry.tool_timeout_secs", self.registry.tool_timeout_secs),
            ("chat.request_timeout_secs", self.chat.request_timeout_secs),
        ];
        for (name, secs) in durations {
            if secs == 0 {
                return Err(RelayError::config_error(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "on")
}

fn parse_secs(var: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(RelayError::config_error(format!("Invalid {}", var))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_redacted_in_debug() {
        let mut config = RelayConfig::default();
        config.auth.shared_secret = Some("s3cr3t-value".into());
        config.chat.api_key = Some("sk-very-secret".into());

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("s3cr3t-value"));
        assert!(!rendered.contains("sk-very-secret"));
    }

    #[test]
    fn file_config_round_trips_through_toml() {
        let raw = r#"
            [server]
            name = "gw"
            host = "127.0.0.1"
            port = 4100
            log_level = "debug"
            enable_cors = false
            heartbeat_secs = 20

            [auth]
            shared_secret = "abc"

            [registry]
            connectors_dir = "conf/connectors"
            tool_timeout_secs = 5

            [chat]
            port = 3100
            api_base_url = "http://localhost:9999/v1"
            model = "test-model"
            system_prompt = "be brief"
            mcp_server_url = "http://localhost:4100/"
            server_label = "gw"
            allowed_tools = ["gmail.create_draft"]
            request_timeout_secs = 10
        "#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, raw.as_bytes()).unwrap();

        let config = RelayConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 4100);
        assert_eq!(config.auth.shared_secret.as_deref(), Some("abc"));
        assert_eq!(config.registry.tool_timeout_secs, 5);
        assert_eq!(config.chat.api_key, None);
        assert_eq!(config.chat.allowed_tools, vec!["gmail.create_draft"]);
    }

    #[test]
    fn file_config_with_zero_heartbeat_is_rejected() {
        let mut config = RelayConfig::default();
        config.server.heartbeat_secs = 0;
        let raw = toml::to_string(&config).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, raw.as_bytes()).unwrap();

        let err = RelayConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("server.heartbeat_secs"));
    }

    #[test]
    fn validate_checks_every_duration() {
        assert!(RelayConfig::default().validate().is_ok());

        let mut config = RelayConfig::default();
        config.registry.tool_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = RelayConfig::default();
        config.chat.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        assert!(parse_secs("X", "0").is_err());
        assert!(parse_secs("X", "abc").is_err());
        assert_eq!(parse_secs("X", "12").unwrap(), 12);
    }
}
