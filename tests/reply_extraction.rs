use relay_mcp::chat::{extract_reply, NO_REPLY};
use serde_json::json;

#[test]
fn message_text_is_trimmed() {
    let response = json!({
        "output": [{ "type": "message", "content": [{ "type": "output_text", "text": " hi " }] }]
    });
    assert_eq!(extract_reply(&response), "hi");
}

#[test]
fn message_text_beats_flat_output_text_and_tool_calls() {
    let response = json!({
        "output": [
            { "type": "mcp_call", "name": "gmail.create_draft", "output": "{}" },
            { "type": "message", "content": [{ "type": "output_text", "text": "Draft ready." }] }
        ],
        "output_text": "flat"
    });
    assert_eq!(extract_reply(&response), "Draft ready.");
}

#[test]
fn flat_output_text_is_used_when_no_message() {
    assert_eq!(extract_reply(&json!({ "output_text": "hello" })), "hello");
    assert_eq!(extract_reply(&json!({ "output_text": "  padded \n" })), "padded");
}

#[test]
fn empty_flat_output_text_is_skipped() {
    let response = json!({
        "output_text": "",
        "output": [{ "type": "mcp_call", "name": "x", "output": "not json" }]
    });
    assert_eq!(extract_reply(&response), "Ran tool x.");
}

#[test]
fn tool_call_with_execution_id() {
    let response = json!({
        "output": [{
            "type": "mcp_call",
            "name": "gmail.create_draft",
            "output": "{\"execution\":{\"id\":\"abc\"}}"
        }]
    });
    assert_eq!(
        extract_reply(&response),
        "Ran tool gmail.create_draft — result id: abc."
    );
}

#[test]
fn results_id_takes_priority_over_execution_id() {
    let response = json!({
        "output": [{
            "type": "mcp_call",
            "name": "gmail.create_draft",
            "output": "{\"results\":[{\"id\":\"r1\"}],\"execution\":{\"id\":\"abc\"}}"
        }]
    });
    assert_eq!(
        extract_reply(&response),
        "Ran tool gmail.create_draft — result id: r1."
    );
}

#[test]
fn tool_call_without_id_or_with_bad_json() {
    let no_id = json!({
        "output": [{ "type": "mcp_call", "name": "x", "output": "{\"ok\":true}" }]
    });
    assert_eq!(extract_reply(&no_id), "Ran tool x.");

    let bad = json!({
        "output": [{ "type": "mcp_call", "name": "x", "output": "not json" }]
    });
    assert_eq!(extract_reply(&bad), "Ran tool x.");
}

#[test]
fn tool_call_needs_name_and_string_output() {
    let response = json!({
        "output": [
            { "type": "mcp_call", "name": "x", "output": { "already": "parsed" } },
            { "type": "mcp_call", "output": "{}" }
        ]
    });
    assert_eq!(extract_reply(&response), NO_REPLY);
}

#[test]
fn absent_or_malformed_payloads_yield_sentinel() {
    assert_eq!(extract_reply(&json!({})), NO_REPLY);
    assert_eq!(extract_reply(&json!(null)), NO_REPLY);
    assert_eq!(extract_reply(&json!({ "output": "oops" })), NO_REPLY);
    assert_eq!(extract_reply(&json!({ "output": [1, "two", null] })), NO_REPLY);
    assert_eq!(extract_reply(&json!({ "raw": "<html>bad gateway</html>" })), NO_REPLY);
    assert_eq!(
        extract_reply(&json!({ "output": [{ "type": "message", "content": "text" }] })),
        NO_REPLY
    );
}
