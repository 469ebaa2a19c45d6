pub mod dto;
pub mod handler;
pub mod legacy;

pub use dto::{McpError, McpRequest, McpResponse, Method, ToolCall};
pub use handler::{Dispatcher, ServerInfo};
