//! Static dispatch table from provider to completion client.
//!
//! ```rust
//! use vprovider::ProviderRegistry;
//!
//! let registry = ProviderRegistry::new();
//! assert!(registry.is_empty());
//! assert!(registry.client_for_model("grok-1").is_err());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::{CompletionClient, ProviderError, ProviderId, resolve};

#[derive(Default)]
pub struct ProviderRegistry {
    clients: HashMap<ProviderId, Arc<dyn CompletionClient>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C>(&mut self, client: C)
    where
        C: CompletionClient + 'static,
    {
        self.clients.insert(client.id(), Arc::new(client));
    }

    pub fn register_shared(&mut self, client: Arc<dyn CompletionClient>) {
        self.clients.insert(client.id(), client);
    }

    pub fn get(&self, provider_id: ProviderId) -> Option<Arc<dyn CompletionClient>> {
        self.clients.get(&provider_id).cloned()
    }

    /// Resolves the model's provider and returns its client.
    pub fn client_for_model(
        &self,
        model_id: &str,
    ) -> Result<Arc<dyn CompletionClient>, ProviderError> {
        let provider = resolve(model_id);
        self.get(provider)
            .ok_or_else(|| ProviderError::unknown_provider(provider.as_str()))
    }

    pub fn remove(&mut self, provider_id: ProviderId) -> Option<Arc<dyn CompletionClient>> {
        self.clients.remove(&provider_id)
    }

    pub fn contains(&self, provider_id: ProviderId) -> bool {
        self.clients.contains_key(&provider_id)
    }

    pub fn providers(&self) -> Vec<ProviderId> {
        let mut providers = self.clients.keys().copied().collect::<Vec<_>>();
        providers.sort();
        providers
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CompletionRequest, CompletionResponse, FinishReason, FragmentStream, ProviderErrorKind,
        ProviderFuture, TokenUsage, VecFragmentStream,
    };

    struct EchoClient(ProviderId);

    impl CompletionClient for EchoClient {
        fn id(&self) -> ProviderId {
            self.0
        }

        fn complete<'a>(
            &'a self,
            request: CompletionRequest,
        ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>> {
            Box::pin(async move {
                Ok(CompletionResponse::single(
                    "echo",
                    request.model,
                    request.prompt,
                    FinishReason::Stop,
                    TokenUsage::default(),
                ))
            })
        }

        fn stream_complete<'a>(
            &'a self,
            request: CompletionRequest,
        ) -> ProviderFuture<'a, Result<FragmentStream<'a>, ProviderError>> {
            Box::pin(async move {
                let stream = VecFragmentStream::new(vec![Ok(request.prompt)]);
                Ok(Box::pin(stream) as FragmentStream<'a>)
            })
        }
    }

    #[test]
    fn registry_dispatches_by_resolved_provider() {
        let mut registry = ProviderRegistry::new();
        registry.register(EchoClient(ProviderId::Xai));
        registry.register(EchoClient(ProviderId::OpenAi));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.providers(), vec![ProviderId::OpenAi, ProviderId::Xai]);

        let grok = registry.client_for_model("grok-1").expect("xai client");
        assert_eq!(grok.id(), ProviderId::Xai);

        let fallback = registry.client_for_model("mystery").expect("default client");
        assert_eq!(fallback.id(), ProviderId::OpenAi);
    }

    #[test]
    fn missing_registration_is_an_unknown_provider_error() {
        let mut registry = ProviderRegistry::new();
        registry.register(EchoClient(ProviderId::OpenAi));

        let error = registry
            .client_for_model("claude-3-opus")
            .err()
            .expect("anthropic is not registered");
        assert_eq!(error.kind, ProviderErrorKind::UnknownProvider);

        assert!(registry.remove(ProviderId::OpenAi).is_some());
        assert!(!registry.contains(ProviderId::OpenAi));
    }
}
