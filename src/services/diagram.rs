//! Diagram service — natural-language description → Mermaid ER diagram.
//!
//! DESIGN
//! ======
//! Receives a free-text database description, wraps it in a fixed
//! instruction template, performs one completion call against the LLM,
//! and hands back the trimmed diagram source. No retries, no caching,
//! no grammar validation: the model's output is trusted as-is, with a
//! prefix check that only downgrades to a warning.

use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::llm::LlmComplete;
use crate::llm::types::{LlmError, Message};

const DEFAULT_DIAGRAM_MAX_TOKENS: u32 = 1000;

/// Every diagram is asked to start with this keyword.
pub const DIAGRAM_KEYWORD: &str = "erDiagram";

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn diagram_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("DIAGRAM_MAX_TOKENS", DEFAULT_DIAGRAM_MAX_TOKENS))
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("LLM not configured")]
    NotConfigured,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("AI service returned an empty response")]
    EmptyCompletion,
}

/// Result of a diagram request: Mermaid source + optional warning text.
#[derive(Debug)]
pub struct Diagram {
    pub mermaid_code: String,
    pub explanation: Option<String>,
}

// =============================================================================
// PROMPT TEMPLATE
// =============================================================================

/// Fixed instruction template sent as the system prompt. States the output
/// conventions: `erDiagram` keyword, attribute blocks, quoted key markers,
/// labeled relationships with cardinality, raw code only.
#[must_use]
pub fn system_prompt() -> &'static str {
    r#"You are an expert database designer AI. Your task is to analyze a natural language description of a database schema provided by the user and generate a corresponding Entity-Relationship (ER) diagram using Mermaid.js syntax.

Please generate the ER diagram using Mermaid.js syntax with the following structure:
- Use `erDiagram` as the starting keyword.
- Define entities with their attributes inside curly braces.
- Use `"PK"` and `"FK"` in quotes to mark primary and foreign keys.
- Define relationships between entities with proper cardinality and labels.

Follow these steps precisely:
1. **Identify Entities:** Determine the main entities (tables) mentioned in the description.
2. **Identify Attributes:** For each entity, list its attributes (columns). If possible, infer data types (like int, string, datetime) and identify potential primary keys (PK) and foreign keys (FK). Mark them clearly using the format `"PK"` or `"FK"` in quotes.
3. **Identify Relationships:** Determine the relationships between entities. Specify the cardinality (one-to-one, one-to-many, many-to-many) using Mermaid syntax:
    * One-to-One: `||--||`
    * One-to-Many: `||--o{` (or `}|--o{` if identifying)
    * Many-to-Many: `}o--o{`
    * Zero/One-to-One: `|o--||`
    * Zero/One-to-Many: `|o--o{`
    * Use relationship labels to describe the connection (e.g., `places`, `contains`).
4. **Format Output:** Generate *only* the Mermaid.js code block for the ER diagram.
    * Start the output *exactly* with `erDiagram`.
    * Define entities using the `ENTITY { ... }` syntax.
    * Define attributes within the curly braces, one per line, including type and PK/FK markers in quotes.
    * Define relationships *after* the entity definitions using the format `ENTITY1 <relationship> ENTITY2 : label`.
    * Do NOT include any introductory text, explanations, apologies, markdown formatting (like ```mermaid ... ```), or closing remarks in your response. Only the raw Mermaid code is allowed.

Example Output Format:
erDiagram
    ENTITY1 ||--o{ ENTITY2 : relationship_label
    ENTITY2 ||--|| ENTITY3 : another_relationship_label

    ENTITY1 {
        int attribute1 "PK"
        string attribute2
        datetime attribute3 "FK"
    }
    ENTITY2 {
        int attribute1 "PK"
        string attribute2
    }
    ENTITY3 {
        int attribute1 "PK"
        string attribute2
    }"#
}

/// User prompt carrying the specific database description.
#[must_use]
pub fn user_prompt(description: &str) -> String {
    format!(
        "Please generate the Mermaid ER diagram code based on the following database description:\n\n\"{description}\""
    )
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Generate a Mermaid ER diagram from a natural-language description.
///
/// Performs exactly one completion call. The returned text is trimmed;
/// a completion that does not start with [`DIAGRAM_KEYWORD`] is still
/// returned, with the format warning carried in `explanation`.
///
/// # Errors
///
/// - [`DiagramError::EmptyDescription`] for empty or whitespace-only input
///   (checked before any network activity)
/// - [`DiagramError::Llm`] when the upstream call fails
/// - [`DiagramError::EmptyCompletion`] when the model returns no text
pub async fn generate(llm: &Arc<dyn LlmComplete>, description: &str) -> Result<Diagram, DiagramError> {
    if description.trim().is_empty() {
        return Err(DiagramError::EmptyDescription);
    }

    info!(description_len = description.len(), preview = truncate(description, 100), "diagram: request received");

    let messages = [Message::user(user_prompt(description))];
    let completion = llm
        .complete(diagram_max_tokens(), system_prompt(), &messages)
        .await?;

    info!(
        model = %completion.model,
        stop_reason = %completion.stop_reason,
        input_tokens = completion.input_tokens,
        output_tokens = completion.output_tokens,
        "diagram: LLM response"
    );

    let mermaid_code = completion.text.trim().to_string();
    if mermaid_code.is_empty() {
        warn!("diagram: empty completion");
        return Err(DiagramError::EmptyCompletion);
    }

    let explanation = if mermaid_code.starts_with(DIAGRAM_KEYWORD) {
        None
    } else {
        warn!(preview = truncate(&mermaid_code, 200), "diagram: completion did not start with erDiagram");
        Some(format!(
            "Warning: AI response format might be incorrect (did not start with '{DIAGRAM_KEYWORD}')."
        ))
    };

    Ok(Diagram { mermaid_code, explanation })
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "diagram_test.rs"]
mod tests;
