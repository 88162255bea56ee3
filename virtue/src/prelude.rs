//! Common imports for most Virtue applications.

pub use crate::{RuntimeBundle, RuntimeConfig, build_runtime, chat_from_env, parse_provider_id};
pub use crate::{
    ChatError, ChatOrchestrator, ChatPhase, ChatSnapshot, CredentialStore, ExportFormat,
    ProviderError, ProviderId, SubmitOutcome, Turn, catalog, resolve,
};
