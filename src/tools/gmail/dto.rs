use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arguments are echoed as given; missing fields become `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDraftInput {
    pub to: Value,
    pub subject: Value,
    pub body: Value,
}

impl CreateDraftInput {
    pub fn from_arguments(arguments: &Map<String, Value>) -> Self {
        let field = |key: &str| arguments.get(key).cloned().unwrap_or(Value::Null);
        Self {
            to: field("to"),
            subject: field("subject"),
            body: field("body"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDraftOutput {
    pub ok: bool,
    #[serde(rename = "draftId")]
    pub draft_id: String,
    pub to: Value,
    pub subject: Value,
    pub body: Value,
}
