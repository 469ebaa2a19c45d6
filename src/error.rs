use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

/// JSON-RPC error codes used in protocol responses.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const UNAUTHORIZED: i32 = -32001;
    pub const TOOL_NOT_FOUND: i32 = -32004;
    pub const TOOL_TIMEOUT: i32 = -32008;
    pub const UPSTREAM_FAILURE: i32 = -32010;
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unsupported method: {method}")]
    UnknownMethod { method: String },

    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("Tool {name} has no handler")]
    ToolUnavailable { name: String },

    #[error("Tool {name} timed out after {seconds}s")]
    ToolTimeout { name: String, seconds: u64 },

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Completion API call failed with status {status}")]
    UpstreamFailure {
        status: u16,
        body: serde_json::Value,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn unknown_method(method: impl Into<String>) -> Self {
        RelayError::UnknownMethod {
            method: method.into(),
        }
    }

    pub fn tool_not_found(name: impl Into<String>) -> Self {
        RelayError::ToolNotFound { name: name.into() }
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        RelayError::InvalidParams(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        RelayError::ConfigError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        RelayError::Internal(msg.into())
    }

    /// Code carried in the `error.code` field of a protocol response.
    pub fn rpc_code(&self) -> i32 {
        match self {
            RelayError::Unauthorized => codes::UNAUTHORIZED,
            RelayError::UnknownMethod { .. } => codes::METHOD_NOT_FOUND,
            RelayError::ToolNotFound { .. } => codes::TOOL_NOT_FOUND,
            RelayError::ToolTimeout { .. } => codes::TOOL_TIMEOUT,
            RelayError::InvalidParams(_) => codes::INVALID_PARAMS,
            RelayError::InvalidRequest(_) => codes::INVALID_REQUEST,
            RelayError::SerializationError(_) => codes::PARSE_ERROR,
            RelayError::UpstreamFailure { .. } | RelayError::NetworkError(_) => {
                codes::UPSTREAM_FAILURE
            }
            RelayError::ToolUnavailable { .. }
            | RelayError::ConfigError(_)
            | RelayError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        status_for_code(self.rpc_code())
    }
}

/// HTTP status used when a protocol response carries the given error code.
pub fn status_for_code(code: i32) -> StatusCode {
    match code {
        codes::UNAUTHORIZED => StatusCode::UNAUTHORIZED,
        codes::TOOL_NOT_FOUND => StatusCode::NOT_FOUND,
        codes::METHOD_NOT_FOUND
        | codes::INVALID_PARAMS
        | codes::INVALID_REQUEST
        | codes::PARSE_ERROR => StatusCode::BAD_REQUEST,
        codes::TOOL_TIMEOUT => StatusCode::GATEWAY_TIMEOUT,
        codes::UPSTREAM_FAILURE => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
