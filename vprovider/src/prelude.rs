//! Common `vprovider` imports for downstream crates.

pub use crate::{
    CompletionClient, CompletionRequest, CompletionResponse, CredentialStore, FinishReason,
    FragmentStream, ProviderError, ProviderErrorKind, ProviderId, ProviderRegistry, SecretString,
    TokenUsage, resolve,
};
pub use vcommon::{BoxFuture, GenerationOptions};

#[cfg(feature = "provider-openai-compat")]
pub use crate::adapters::openai_compat::{HttpChatCompletionsTransport, OpenAiCompatibleClient};
