//! LLM types — provider-neutral message types and errors.
//!
//! Provider-neutral types shared by the Anthropic and `OpenAI` clients.
//! The relay only ever needs plain text completions, so messages carry a
//! role and a string body — no tool or block structure.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }
}

/// Response from an LLM completion call.
#[derive(Debug, Serialize, Deserialize)]
pub struct Completion {
    /// Concatenated text output of the model.
    pub text: String,
    pub model: String,
    pub stop_reason: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// COMPLETION TRAIT
// =============================================================================

/// Provider-neutral async trait for text completion. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmComplete: Send + Sync {
    /// Send a completion request to the LLM provider.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is malformed,
    /// or the API key is absent.
    async fn complete(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<Completion, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
