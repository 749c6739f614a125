//! LLM — multi-provider adapter for the diagram relay.
//!
//! DESIGN
//! ======
//! The `LlmClient` enum dispatches to OpenAI or Anthropic based on
//! `LLM_PROVIDER`. All configuration comes from environment variables.
//! Handlers only see the [`LlmComplete`] trait so tests can mock the
//! upstream service.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmComplete;
use types::{Completion, LlmError, Message};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either OpenAI or Anthropic.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
}

enum LlmProvider {
    OpenAi(openai::OpenAiClient),
    Anthropic(anthropic::AnthropicClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// - `LLM_PROVIDER`: "openai" (default) or "anthropic"
    /// - `LLM_API_KEY_ENV`: name of env var holding the API key
    ///   (defaults to `OPENAI_API_KEY` / `ANTHROPIC_API_KEY` by provider)
    /// - `LLM_MODEL`: model name (e.g. "gpt-4-turbo")
    /// - `LLM_OPENAI_MODE`: `"chat_completions"` (default) or "responses"
    /// - `LLM_OPENAI_BASE_URL`: custom base URL for OpenAI-compatible APIs
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let inner = match config.provider {
            LlmProviderKind::OpenAi => LlmProvider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.openai_mode,
                config.openai_base_url,
                config.timeouts,
            )?),
            LlmProviderKind::Anthropic => {
                LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.timeouts)?)
            }
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name (e.g. `"gpt-4-turbo"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete_inner(
        &self,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<Completion, LlmError> {
        match &self.inner {
            LlmProvider::OpenAi(c) => {
                c.complete(&self.model, max_tokens, system, messages)
                    .await
            }
            LlmProvider::Anthropic(c) => {
                c.complete(&self.model, max_tokens, system, messages)
                    .await
            }
        }
    }
}

#[async_trait::async_trait]
impl LlmComplete for LlmClient {
    async fn complete(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<Completion, LlmError> {
        self.complete_inner(max_tokens, system, messages).await
    }
}
