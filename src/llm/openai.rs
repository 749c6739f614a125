//! OpenAI-compatible API client.
//!
//! Thin HTTP wrapper supporting both `/v1/chat/completions` and
//! `/v1/responses`. Pure parse functions for testability.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::{LlmTimeouts, OpenAiApiMode};
use super::types::{Completion, LlmError, Message};

/// Sampling parameters held fixed for schema generation: low temperature
/// keeps the emitted diagram syntax close to deterministic.
const TEMPERATURE: f64 = 0.2;
const TOP_P: f64 = 1.0;
const FREQUENCY_PENALTY: f64 = 0.0;
const PRESENCE_PENALTY: f64 = 0.0;

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    mode: OpenAiApiMode,
}

impl OpenAiClient {
    pub fn new(api_key: String, mode: OpenAiApiMode, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url, mode })
    }

    pub async fn complete(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<Completion, LlmError> {
        match self.mode {
            OpenAiApiMode::ChatCompletions => {
                self.chat_completions(model, max_tokens, system, messages)
                    .await
            }
            OpenAiApiMode::Responses => self.responses(model, max_tokens, system, messages).await,
        }
    }

    async fn chat_completions(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<Completion, LlmError> {
        let msgs = build_chat_completions_messages(system, messages);
        let body = CcRequest {
            model,
            max_tokens,
            messages: &msgs,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        };
        let text = self.send_json("/chat/completions", &body).await?;
        parse_chat_completions_response(&text)
    }

    async fn responses(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<Completion, LlmError> {
        let input: Vec<RespInputItem<'_>> = messages.iter().map(RespInputItem::from).collect();
        let body = RespRequest {
            model,
            max_output_tokens: max_tokens,
            instructions: system,
            input: &input,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        };
        let text = self.send_json("/responses", &body).await?;
        parse_responses_response(&text)
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// CHAT COMPLETIONS — wire types
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [CcMessage<'a>],
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'a str,
    content: &'a str,
}

fn build_chat_completions_messages<'a>(system: &'a str, messages: &'a [Message]) -> Vec<CcMessage<'a>> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system.trim().is_empty() {
        out.push(CcMessage { role: "system", content: system });
    }
    for message in messages {
        out.push(CcMessage { role: &message.role, content: &message.content });
    }
    out
}

// =============================================================================
// RESPONSES — wire types
// =============================================================================

#[derive(Serialize)]
struct RespRequest<'a> {
    model: &'a str,
    max_output_tokens: u32,
    instructions: &'a str,
    input: &'a [RespInputItem<'a>],
    temperature: f64,
    top_p: f64,
}

#[derive(Serialize)]
struct RespInputItem<'a> {
    #[serde(rename = "type")]
    item_type: &'static str,
    role: &'a str,
    content: Vec<RespTextContent<'a>>,
}

#[derive(Serialize)]
struct RespTextContent<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    text: &'a str,
}

impl<'a> From<&'a Message> for RespInputItem<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            item_type: "message",
            role: &message.role,
            content: vec![RespTextContent { content_type: "input_text", text: &message.content }],
        }
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<Completion, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();
    let input_tokens = root
        .get("usage")
        .and_then(|u| u.get("prompt_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let output_tokens = root
        .get("usage")
        .and_then(|u| u.get("completion_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    let finish_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .unwrap_or("stop");
    let text = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let stop_reason = if finish_reason == "length" { "max_tokens" } else { "end_turn" };

    Ok(Completion { text, model, stop_reason: stop_reason.to_string(), input_tokens, output_tokens })
}

pub(crate) fn parse_responses_response(json_text: &str) -> Result<Completion, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();
    let input_tokens = root
        .get("usage")
        .and_then(|u| u.get("input_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let output_tokens = root
        .get("usage")
        .and_then(|u| u.get("output_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let mut text = String::new();
    if let Some(items) = root.get("output").and_then(Value::as_array) {
        for item in items {
            if item.get("type").and_then(Value::as_str) != Some("message") {
                continue;
            }
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for part in parts {
                let kind = part.get("type").and_then(Value::as_str);
                let part_text = part
                    .get("text")
                    .or_else(|| part.get("output_text"))
                    .and_then(Value::as_str)
                    .unwrap_or("");
                if matches!(kind, Some("output_text" | "text")) {
                    text.push_str(part_text);
                }
            }
        }
    } else if let Some(output_text) = root.get("output_text").and_then(Value::as_str) {
        text.push_str(output_text);
    }

    let stop_reason = if root
        .get("incomplete_details")
        .and_then(|d| d.get("reason"))
        .and_then(Value::as_str)
        == Some("max_output_tokens")
    {
        "max_tokens"
    } else {
        "end_turn"
    };

    Ok(Completion { text, model, stop_reason: stop_reason.to_string(), input_tokens, output_tokens })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
