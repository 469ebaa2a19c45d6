use async_trait::async_trait;
use serde_json::{Map, Value};

use super::dto::CreateDraftInput;
use super::implementation::GmailTools;
use crate::error::Result;
use crate::tools::{ContentBlock, ToolHandler, ToolResult};

pub struct CreateDraftHandler {
    tools: GmailTools,
}

impl CreateDraftHandler {
    pub fn new(tools: GmailTools) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl ToolHandler for CreateDraftHandler {
    async fn call(&self, arguments: Map<String, Value>) -> Result<ToolResult> {
        let input = CreateDraftInput::from_arguments(&arguments);
        let output = self.tools.create_draft(input);
        tracing::info!(draft_id = %output.draft_id, "Created draft");

        let summary = match output.to.as_str() {
            Some(to) => format!("Draft {} created for {}", output.draft_id, to),
            None => format!("Draft {} created", output.draft_id),
        };
        Ok(ToolResult::ok(vec![
            ContentBlock::Json {
                data: serde_json::to_value(&output)?,
            },
            ContentBlock::Text { text: summary },
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::SequentialIds;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn echoes_arguments_with_generated_id() {
        let handler = CreateDraftHandler::new(GmailTools::new(Arc::new(SequentialIds::new())));
        let args = json!({ "to": "a@b.c", "subject": "Hi" });
        let result =
            tokio_test::block_on(handler.call(args.as_object().cloned().unwrap())).unwrap();

        assert!(!result.is_error);
        assert_eq!(
            result.content[0],
            ContentBlock::Json {
                data: json!({
                    "ok": true,
                    "draftId": "dr_1",
                    "to": "a@b.c",
                    "subject": "Hi",
                    "body": null
                })
            }
        );
        assert_eq!(
            result.content[1],
            ContentBlock::Text {
                text: "Draft dr_1 created for a@b.c".into()
            }
        );
    }
}
