//! Runtime wiring helpers: HTTP client, provider registry, and chat orchestrator.

use std::sync::Arc;

use reqwest::Client;
use vchat::{ChatOrchestrator, InMemoryTranscriptStore, TranscriptStore};
use vprovider::prelude::{HttpChatCompletionsTransport, OpenAiCompatibleClient};
use vprovider::{CredentialStore, ProviderError, ProviderId, ProviderRegistry};

use crate::RuntimeConfig;

#[derive(Debug, Clone)]
pub struct RuntimeBundle {
    pub config: RuntimeConfig,
    pub credentials: Arc<CredentialStore>,
    pub chat: Arc<ChatOrchestrator>,
}

impl RuntimeBundle {
    /// Submits `text` against the configured default model.
    pub async fn submit_default(
        &self,
        text: &str,
    ) -> Result<vchat::SubmitOutcome, vchat::ChatError> {
        self.chat.submit(text, &self.config.default_model).await
    }
}

pub fn build_http_client(config: &RuntimeConfig) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))
}

/// Registers a chat-completions client for every known provider, sharing one
/// HTTP connection pool and one credential store.
pub fn build_registry(
    config: &RuntimeConfig,
    credentials: Arc<CredentialStore>,
) -> Result<ProviderRegistry, ProviderError> {
    let http = build_http_client(config)?;
    let mut registry = ProviderRegistry::new();

    for provider in ProviderId::ALL {
        let transport = HttpChatCompletionsTransport::new(http.clone(), config.base_url(provider));
        registry.register(OpenAiCompatibleClient::new(
            provider,
            Arc::clone(&credentials),
            Arc::new(transport),
        ));
    }

    tracing::debug!(
        phase = "runtime",
        event = "registry_built",
        providers = registry.len(),
        overridden_base_urls = config.base_urls.len(),
        timeout_secs = config.request_timeout.as_secs()
    );
    Ok(registry)
}

pub fn build_runtime(
    config: RuntimeConfig,
    credentials: Arc<CredentialStore>,
) -> Result<RuntimeBundle, ProviderError> {
    build_runtime_with_store(config, credentials, Arc::new(InMemoryTranscriptStore::new()))
}

pub fn build_runtime_with_store(
    config: RuntimeConfig,
    credentials: Arc<CredentialStore>,
    store: Arc<dyn TranscriptStore>,
) -> Result<RuntimeBundle, ProviderError> {
    let registry = build_registry(&config, Arc::clone(&credentials))?;
    let chat = ChatOrchestrator::new(Arc::new(registry), store).with_options(config.chat_options());

    Ok(RuntimeBundle {
        config,
        credentials,
        chat: Arc::new(chat),
    })
}

/// Environment-configured runtime with an in-memory transcript.
pub fn chat_from_env() -> Result<RuntimeBundle, ProviderError> {
    build_runtime(
        RuntimeConfig::from_env(),
        Arc::new(CredentialStore::from_env()),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use vchat::{ChatPhase, SubmitOutcome};
    use vprovider::{CredentialStore, ProviderId};

    use super::{build_registry, build_runtime};
    use crate::RuntimeConfig;

    #[test]
    fn registry_serves_every_provider() {
        let registry = build_registry(
            &RuntimeConfig::default(),
            Arc::new(CredentialStore::new()),
        )
        .expect("registry should build");

        assert_eq!(registry.len(), ProviderId::ALL.len());
        for provider in ProviderId::ALL {
            assert!(registry.contains(provider));
        }
        assert!(registry.client_for_model("grok-1").is_ok());
        assert!(registry.client_for_model("unknown-model-x").is_ok());
    }

    #[tokio::test]
    async fn runtime_without_credentials_records_the_failure_notice() {
        let config = RuntimeConfig::default()
            .with_request_timeout(Duration::from_secs(5))
            .with_base_url(ProviderId::Xai, "http://127.0.0.1:9/v1");
        let runtime =
            build_runtime(config, Arc::new(CredentialStore::new())).expect("runtime should build");

        let outcome = runtime
            .chat
            .submit("hello", "grok-1")
            .await
            .expect("store should not fail");

        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        let snapshot = runtime.chat.snapshot();
        assert_eq!(snapshot.phase, ChatPhase::IdleWithError);
        assert_eq!(snapshot.turns.len(), 2);
    }

    #[test]
    fn streaming_config_reaches_the_orchestrator() {
        let runtime = build_runtime(
            RuntimeConfig::default().with_streaming(true),
            Arc::new(CredentialStore::new()),
        )
        .expect("runtime should build");

        assert!(runtime.chat.options().generation.stream);
        assert_eq!(runtime.config.default_model, "gpt-4o");
    }
}
