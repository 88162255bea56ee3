//! Small convenience helpers for callers that take provider names as text.

use vprovider::{CredentialStore, ProviderError, ProviderId};

/// Parses a provider name, accepting vendor and product aliases.
pub fn parse_provider_id(value: &str) -> Option<ProviderId> {
    match value.trim().to_ascii_lowercase().as_str() {
        "openai" | "gpt" => Some(ProviderId::OpenAi),
        "anthropic" | "claude" => Some(ProviderId::Anthropic),
        "google" | "gemini" => Some(ProviderId::Google),
        "deepseek" => Some(ProviderId::DeepSeek),
        "qwen" | "alibaba" | "dashscope" => Some(ProviderId::Qwen),
        "kimi" | "moonshot" => Some(ProviderId::Kimi),
        "meta" | "llama" => Some(ProviderId::Meta),
        "xai" | "x.ai" | "grok" => Some(ProviderId::Xai),
        _ => None,
    }
}

/// Stores `api_key` for the provider named by `provider`.
pub fn set_api_key_by_name(
    credentials: &CredentialStore,
    provider: &str,
    api_key: impl Into<String>,
) -> Result<ProviderId, ProviderError> {
    let id = parse_provider_id(provider).ok_or_else(|| ProviderError::unknown_provider(provider))?;
    credentials.set_api_key(id, api_key)?;
    Ok(id)
}
