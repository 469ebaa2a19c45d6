use std::sync::Arc;

use serde_json::json;

use super::dto::{CreateDraftInput, CreateDraftOutput};
use crate::registry::ToolDescriptor;
use crate::tools::IdGenerator;

pub const CREATE_DRAFT: &str = "gmail.create_draft";

/// Built-in descriptor used when no connector declares any tools.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: CREATE_DRAFT.to_string(),
        description: "Create a Gmail draft".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "to": { "type": "string" },
                "subject": { "type": "string" },
                "body": { "type": "string" }
            },
            "required": ["to", "subject", "body"]
        }),
    }
}

/// Stub mail tools. Nothing is sent; the draft only exists in the response.
#[derive(Clone)]
pub struct GmailTools {
    ids: Arc<dyn IdGenerator>,
}

impl GmailTools {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    pub fn create_draft(&self, input: CreateDraftInput) -> CreateDraftOutput {
        CreateDraftOutput {
            ok: true,
            draft_id: self.ids.next_id("dr_"),
            to: input.to,
            subject: input.subject,
            body: input.body,
        }
    }
}
