pub mod dto;
pub mod handler;
pub mod implementation;

pub use dto::{CreateDraftInput, CreateDraftOutput};
pub use handler::CreateDraftHandler;
pub use implementation::{descriptor, GmailTools, CREATE_DRAFT};
