use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "empty_object_schema")]
    pub input_schema: Value,
}

fn empty_object_schema() -> Value {
    json!({ "type": "object", "properties": {} })
}

/// One connector document: a `tools` list and nothing else we care about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolDocument {
    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Clone)]
pub struct ToolSource {
    /// Where the document came from, for log messages.
    pub origin: String,
    pub document: ToolDocument,
}

impl ToolSource {
    pub fn new(origin: impl Into<String>, tools: Vec<ToolDescriptor>) -> Self {
        Self {
            origin: origin.into(),
            document: ToolDocument { tools },
        }
    }
}
