//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! There is no database and no per-request bookkeeping: the whole app is
//! stateless request/response glue around a single optional LLM client.

use std::sync::Arc;

use crate::llm::LlmComplete;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — the inner client is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmComplete>>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmComplete>>) -> Self {
        Self { llm }
    }
}
