use super::*;

// ===== chat completions =====

#[test]
fn cc_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "erDiagram\n  ORDERS { int order_id \"PK\" }" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert!(resp.text.starts_with("erDiagram"));
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 10);
    assert_eq!(resp.output_tokens, 5);
}

#[test]
fn cc_parse_length_maps_to_max_tokens() {
    let json = serde_json::json!({
        "model": "gpt-4-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "erDiagram" },
            "finish_reason": "length"
        }],
        "usage": { "prompt_tokens": 1, "completion_tokens": 1 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "max_tokens");
}

#[test]
fn cc_parse_missing_choices() {
    let json = serde_json::json!({ "model": "gpt-4-turbo", "choices": [] }).to_string();
    assert!(parse_chat_completions_response(&json).is_err());
}

#[test]
fn cc_parse_null_content_yields_empty_text() {
    let json = serde_json::json!({
        "model": "gpt-4-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": null },
            "finish_reason": "stop"
        }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert!(resp.text.is_empty());
}

#[test]
fn cc_parse_invalid_json_errors() {
    assert!(parse_chat_completions_response("not json").is_err());
}

// ===== responses API =====

#[test]
fn resp_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4-turbo",
        "output": [{
            "type": "message",
            "content": [{ "type": "output_text", "text": "erDiagram" }]
        }],
        "usage": { "input_tokens": 15, "output_tokens": 8 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text, "erDiagram");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 15);
}

#[test]
fn resp_parse_joins_multiple_parts() {
    let json = serde_json::json!({
        "model": "gpt-4-turbo",
        "output": [{
            "type": "message",
            "content": [
                { "type": "output_text", "text": "erDiagram\n" },
                { "type": "output_text", "text": "  ORDERS { }" }
            ]
        }]
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text, "erDiagram\n  ORDERS { }");
}

#[test]
fn resp_parse_output_text_fallback() {
    let json = serde_json::json!({
        "model": "gpt-4-turbo",
        "output_text": "Fallback text",
        "usage": { "input_tokens": 5, "output_tokens": 3 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text, "Fallback text");
}

#[test]
fn resp_parse_incomplete_maps_to_max_tokens() {
    let json = serde_json::json!({
        "model": "gpt-4-turbo",
        "output": [],
        "incomplete_details": { "reason": "max_output_tokens" }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "max_tokens");
}

// ===== request building =====

#[test]
fn cc_messages_include_system_first() {
    let messages = [Message::user("hello")];
    let out = build_chat_completions_messages("you are a database designer", &messages);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].role, "system");
    assert_eq!(out[1].role, "user");
    assert_eq!(out[1].content, "hello");
}

#[test]
fn cc_messages_skip_blank_system() {
    let messages = [Message::user("hello")];
    let out = build_chat_completions_messages("   ", &messages);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].role, "user");
}
