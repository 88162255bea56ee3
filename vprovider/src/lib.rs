//! Provider routing, credentials, and completion clients.
//!
//! A model id resolves to a [`ProviderId`] through a static prefix table. Each
//! provider is served by a [`CompletionClient`]; the bundled
//! [`adapters::openai_compat::OpenAiCompatibleClient`] speaks the
//! chat-completions protocol every supported provider exposes.
//!
//! ```rust
//! use vprovider::{CompletionRequest, ProviderId, resolve};
//!
//! let request = CompletionRequest::new("grok-1", "Hi").enable_streaming();
//! assert!(request.validate().is_ok());
//! assert_eq!(resolve(&request.model), ProviderId::Xai);
//! ```

pub mod adapters;
pub mod catalog;
pub mod credentials;
pub mod error;
pub mod model;
pub mod prelude;
pub mod provider;
pub mod registry;
pub mod resolver;
#[cfg(feature = "provider-openai-compat")]
pub mod sse;
pub mod stream;

pub use catalog::{ModelInfo, catalog, find_model};
pub use credentials::{CredentialStore, SecretString};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    CompletionChoice, CompletionRequest, CompletionResponse, FinishReason, ProviderId, TokenUsage,
};
pub use provider::{CompletionClient, ProviderFuture};
pub use registry::ProviderRegistry;
pub use resolver::{DEFAULT_PROVIDER, ProviderDescriptor, descriptor, descriptors, resolve};
#[cfg(feature = "provider-openai-compat")]
pub use sse::{SseDecoder, SseEvent, StreamDecodeError};
pub use stream::{FragmentStream, TextFragmentStream, VecFragmentStream};
pub use vcommon::GenerationOptions;
