//! Model identifier to provider routing.
//!
//! ```rust
//! use vprovider::{ProviderId, resolve};
//!
//! assert_eq!(resolve("claude-3-sonnet"), ProviderId::Anthropic);
//! assert_eq!(resolve("unknown-model-x"), ProviderId::OpenAi);
//! ```

use crate::ProviderId;

pub const DEFAULT_PROVIDER: ProviderId = ProviderId::OpenAi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    pub credential_env_name: &'static str,
    pub default_base_url: &'static str,
}

// Indexed by `ProviderId as usize`.
static DESCRIPTORS: [ProviderDescriptor; 8] = [
    ProviderDescriptor {
        id: ProviderId::OpenAi,
        credential_env_name: "OPENAI_API_KEY",
        default_base_url: "https://api.openai.com/v1",
    },
    ProviderDescriptor {
        id: ProviderId::Anthropic,
        credential_env_name: "ANTHROPIC_API_KEY",
        default_base_url: "https://api.anthropic.com/v1",
    },
    ProviderDescriptor {
        id: ProviderId::Google,
        credential_env_name: "GOOGLE_API_KEY",
        default_base_url: "https://generativelanguage.googleapis.com/v1beta/openai",
    },
    ProviderDescriptor {
        id: ProviderId::DeepSeek,
        credential_env_name: "DEEPSEEK_API_KEY",
        default_base_url: "https://api.deepseek.com/v1",
    },
    ProviderDescriptor {
        id: ProviderId::Qwen,
        credential_env_name: "QWEN_API_KEY",
        default_base_url: "https://dashscope.aliyuncs.com/compatible-mode/v1",
    },
    ProviderDescriptor {
        id: ProviderId::Kimi,
        credential_env_name: "KIMI_API_KEY",
        default_base_url: "https://api.moonshot.cn/v1",
    },
    ProviderDescriptor {
        id: ProviderId::Meta,
        credential_env_name: "META_API_KEY",
        default_base_url: "https://api.llama.com/compat/v1",
    },
    ProviderDescriptor {
        id: ProviderId::Xai,
        credential_env_name: "GROK_API_KEY",
        default_base_url: "https://api.x.ai/v1",
    },
];

/// Ordered prefix table; the first match wins.
static ROUTES: [(&str, ProviderId); 8] = [
    ("gpt-", ProviderId::OpenAi),
    ("claude-", ProviderId::Anthropic),
    ("gemini-", ProviderId::Google),
    ("deepseek-", ProviderId::DeepSeek),
    ("qwen-", ProviderId::Qwen),
    ("kimi-", ProviderId::Kimi),
    ("llama-", ProviderId::Meta),
    ("grok-", ProviderId::Xai),
];

/// Maps a model identifier to its provider. Total: unmatched ids route to
/// [`DEFAULT_PROVIDER`].
pub fn resolve(model_id: &str) -> ProviderId {
    ROUTES
        .iter()
        .find(|(prefix, _)| model_id.starts_with(prefix))
        .map(|(_, provider)| *provider)
        .unwrap_or(DEFAULT_PROVIDER)
}

pub fn descriptor(provider: ProviderId) -> &'static ProviderDescriptor {
    &DESCRIPTORS[provider as usize]
}

pub fn descriptors() -> &'static [ProviderDescriptor] {
    &DESCRIPTORS
}

impl ProviderId {
    pub fn descriptor(self) -> &'static ProviderDescriptor {
        descriptor(self)
    }
}
