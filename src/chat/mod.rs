pub mod bridge;
pub mod dto;
pub mod extract;
pub mod handler;

pub use bridge::ChatBridge;
pub use dto::{ChatReply, ChatRequest, CompletionRequest, InputMessage, McpToolSpec};
pub use extract::{extract_reply, NO_REPLY};
pub use handler::router;
