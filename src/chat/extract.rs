//! Turns a completion API response into one display string.
//!
//! Rules are tried in a fixed order: assistant message text, then the flat
//! `output_text` field, then a summary of the first tool call, then
//! [`NO_REPLY`]. Works on raw JSON so that no payload shape can make it fail.

use serde_json::Value;

pub const NO_REPLY: &str = "no reply";

pub fn extract_reply(response: &Value) -> String {
    message_text(response)
        .or_else(|| flat_output_text(response))
        .or_else(|| tool_call_summary(response))
        .unwrap_or_else(|| NO_REPLY.to_string())
}

fn output_items(response: &Value) -> &[Value] {
    response
        .get("output")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn has_type(item: &Value, kind: &str) -> bool {
    item.get("type").and_then(Value::as_str) == Some(kind)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn message_text(response: &Value) -> Option<String> {
    let message = output_items(response)
        .iter()
        .find(|item| has_type(item, "message"))?;
    let block = message
        .get("content")?
        .as_array()?
        .iter()
        .find(|block| has_type(block, "output_text"))?;
    non_empty_str(block.get("text")).map(|text| text.trim().to_string())
}

fn flat_output_text(response: &Value) -> Option<String> {
    non_empty_str(response.get("output_text")).map(|text| text.trim().to_string())
}

fn tool_call_summary(response: &Value) -> Option<String> {
    let (name, output) = output_items(response)
        .iter()
        .filter(|item| has_type(item, "mcp_call"))
        .find_map(|item| {
            let name = non_empty_str(item.get("name"))?;
            let output = item.get("output")?.as_str()?;
            Some((name, output))
        })?;

    let result_id = serde_json::from_str::<Value>(output)
        .ok()
        .and_then(|parsed| {
            result_identifier(parsed.pointer("/results/0/id"))
                .or_else(|| result_identifier(parsed.pointer("/execution/id")))
        });

    Some(match result_id {
        Some(id) => format!("Ran tool {} — result id: {}.", name, id),
        None => format!("Ran tool {}.", name),
    })
}

fn result_identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
