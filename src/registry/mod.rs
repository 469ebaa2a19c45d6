pub mod dto;
mod helpers;
pub mod implementation;

pub use dto::{ToolDescriptor, ToolDocument, ToolSource};
pub use helpers::{load_sources_from_dir, parse_document};
pub use implementation::ToolRegistry;
