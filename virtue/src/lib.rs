//! Unified facade over the Virtue workspace crates.
//!
//! Most applications only need this crate: it re-exports provider routing,
//! the chat orchestrator, and helpers that wire them together from a
//! [`RuntimeConfig`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use virtue::{CredentialStore, ProviderId, RuntimeConfig, build_runtime, parse_provider_id};
//!
//! let credentials = Arc::new(CredentialStore::new());
//! let provider = parse_provider_id("grok").unwrap();
//! credentials.set_api_key(provider, "xai-test-key").unwrap();
//!
//! let runtime = build_runtime(RuntimeConfig::default(), credentials).unwrap();
//! assert_eq!(provider, ProviderId::Xai);
//! assert!(!runtime.chat.is_busy());
//! ```

mod config;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use vchat;
pub use vcommon;
pub use vprovider;

pub use vchat::{
    ChatError, ChatErrorKind, ChatOptions, ChatOrchestrator, ChatPhase, ChatSnapshot,
    DEFAULT_EXPORT_TITLE, ExportFormat, ExportedDocument, IgnoreReason, InMemoryTranscriptStore,
    Role, SubmitOutcome, TranscriptStore, Turn, export_transcript,
};
pub use vcommon::{BoxFuture, GenerationOptions, TurnId};
pub use vprovider::{
    CompletionClient, CompletionRequest, CompletionResponse, CredentialStore, FinishReason,
    FragmentStream, ModelInfo, ProviderDescriptor, ProviderError, ProviderErrorKind,
    ProviderFuture, ProviderId, ProviderRegistry, SecretString, TokenUsage, catalog, find_model,
    resolve,
};

pub use config::{
    DEFAULT_MODEL, DEFAULT_MODEL_VAR, DEFAULT_REQUEST_TIMEOUT, REQUEST_TIMEOUT_VAR, RuntimeConfig,
    STREAMING_VAR, base_url_var,
};
pub use runtime::{
    RuntimeBundle, build_http_client, build_registry, build_runtime, build_runtime_with_store,
    chat_from_env,
};
pub use util::{parse_provider_id, set_api_key_by_name};
