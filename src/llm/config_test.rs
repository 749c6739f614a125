use super::*;

// Pure parse helpers only: `from_env` mutates no state, but testing it would
// require exclusive env-var access across the whole test binary.

#[test]
fn provider_defaults_to_openai() {
    assert_eq!(parse_provider(None).unwrap(), LlmProviderKind::OpenAi);
}

#[test]
fn provider_parses_anthropic() {
    assert_eq!(parse_provider(Some("anthropic")).unwrap(), LlmProviderKind::Anthropic);
}

#[test]
fn provider_unknown_errors() {
    let err = parse_provider(Some("bad")).unwrap_err().to_string();
    assert!(err.contains("unknown LLM_PROVIDER"));
}

#[test]
fn openai_mode_defaults_to_chat_completions() {
    assert_eq!(parse_openai_mode(None).unwrap(), OpenAiApiMode::ChatCompletions);
}

#[test]
fn openai_mode_parses_responses() {
    assert_eq!(parse_openai_mode(Some("responses")).unwrap(), OpenAiApiMode::Responses);
}

#[test]
fn openai_mode_unknown_errors() {
    let err = parse_openai_mode(Some("bad_mode")).unwrap_err().to_string();
    assert!(err.contains("unsupported openai_api mode"));
}

#[test]
fn default_key_var_follows_provider() {
    assert_eq!(default_key_var(LlmProviderKind::OpenAi), "OPENAI_API_KEY");
    assert_eq!(default_key_var(LlmProviderKind::Anthropic), "ANTHROPIC_API_KEY");
}

#[test]
fn default_model_follows_provider() {
    assert_eq!(default_model(LlmProviderKind::OpenAi), "gpt-4-turbo");
    assert!(default_model(LlmProviderKind::Anthropic).starts_with("claude"));
}
