pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod registry;
pub mod server;
pub mod sse;
pub mod tools;

pub use auth::{authenticate, SharedSecretAuth};
pub use config::RelayConfig;
pub use error::{RelayError, Result};
pub use registry::ToolRegistry;
pub use server::RelayServer;
