use super::*;
use crate::llm::types::Completion;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

// =========================================================================
// MockLlm
// =========================================================================

struct MockLlm {
    responses: Mutex<Vec<Result<Completion, LlmError>>>,
    calls: AtomicUsize,
}

impl MockLlm {
    fn new(responses: Vec<Result<Completion, LlmError>>) -> Arc<dyn LlmComplete> {
        Arc::new(Self { responses: Mutex::new(responses), calls: AtomicUsize::new(0) })
    }

    fn with_text(text: &str) -> Arc<dyn LlmComplete> {
        Self::new(vec![Ok(completion(text))])
    }
}

fn completion(text: &str) -> Completion {
    Completion {
        text: text.into(),
        model: "mock".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 10,
        output_tokens: 20,
    }
}

#[async_trait::async_trait]
impl LlmComplete for MockLlm {
    async fn complete(&self, _max_tokens: u32, _system: &str, _messages: &[Message]) -> Result<Completion, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() { Ok(completion("erDiagram")) } else { responses.remove(0) }
    }
}

// =========================================================================
// prompt template
// =========================================================================

#[test]
fn system_prompt_states_output_conventions() {
    let prompt = system_prompt();
    assert!(prompt.contains("erDiagram"));
    assert!(prompt.contains("\"PK\""));
    assert!(prompt.contains("\"FK\""));
    assert!(prompt.contains("||--o{"));
    assert!(prompt.contains("cardinality"));
}

#[test]
fn user_prompt_embeds_description() {
    let prompt = user_prompt("orders table with order_id primary key");
    assert!(prompt.contains("\"orders table with order_id primary key\""));
}

// =========================================================================
// generate
// =========================================================================

#[tokio::test]
async fn empty_description_rejected_before_llm_call() {
    let llm = MockLlm::with_text("erDiagram");
    let err = generate(&llm, "").await.unwrap_err();
    assert!(matches!(err, DiagramError::EmptyDescription));
}

#[tokio::test]
async fn whitespace_description_rejected_before_llm_call() {
    let mock = Arc::new(MockLlm { responses: Mutex::new(vec![]), calls: AtomicUsize::new(0) });
    let llm: Arc<dyn LlmComplete> = mock.clone();
    let err = generate(&llm, "   \n\t ").await.unwrap_err();
    assert!(matches!(err, DiagramError::EmptyDescription));
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn completion_text_returned_verbatim_after_trim() {
    let llm = MockLlm::with_text("\n  erDiagram\n  ORDERS { int order_id \"PK\" }\n");
    let diagram = generate(&llm, "orders table with order_id primary key")
        .await
        .unwrap();
    assert_eq!(diagram.mermaid_code, "erDiagram\n  ORDERS { int order_id \"PK\" }");
    assert!(diagram.explanation.is_none());
}

#[tokio::test]
async fn non_er_diagram_prefix_carries_warning() {
    let llm = MockLlm::with_text("```mermaid\nerDiagram\n```");
    let diagram = generate(&llm, "a schema").await.unwrap();
    assert_eq!(diagram.mermaid_code, "```mermaid\nerDiagram\n```");
    let explanation = diagram.explanation.unwrap();
    assert!(explanation.contains("did not start with 'erDiagram'"));
}

#[tokio::test]
async fn empty_completion_is_an_error() {
    let llm = MockLlm::with_text("   \n ");
    let err = generate(&llm, "a schema").await.unwrap_err();
    assert!(matches!(err, DiagramError::EmptyCompletion));
}

#[tokio::test]
async fn llm_error_propagates() {
    let llm = MockLlm::new(vec![Err(LlmError::ApiResponse { status: 503, body: "overloaded".into() })]);
    let err = generate(&llm, "a schema").await.unwrap_err();
    assert!(matches!(err, DiagramError::Llm(LlmError::ApiResponse { status: 503, .. })));
}

// =========================================================================
// truncate
// =========================================================================

#[test]
fn truncate_short_string_unchanged() {
    assert_eq!(truncate("abc", 100), "abc");
}

#[test]
fn truncate_respects_char_boundaries() {
    assert_eq!(truncate("héllo wörld", 5), "héllo");
}
