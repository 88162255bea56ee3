//! Completion client for providers that speak the chat-completions protocol.

use std::sync::Arc;

use async_stream::try_stream;
use futures_util::StreamExt;
use reqwest::Client;

use crate::sse::{SseDecoder, SseEvent};
use crate::{
    CompletionClient, CompletionRequest, CompletionResponse, CredentialStore, FragmentStream,
    ProviderError, ProviderFuture, ProviderId, SecretString,
};

use super::serde_api::ChatCompletionsRequest;
use super::transport::{ByteStream, ChatCompletionsTransport, HttpChatCompletionsTransport};

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    provider: ProviderId,
    credentials: Arc<CredentialStore>,
    transport: Arc<dyn ChatCompletionsTransport>,
}

impl OpenAiCompatibleClient {
    pub fn new(
        provider: ProviderId,
        credentials: Arc<CredentialStore>,
        transport: Arc<dyn ChatCompletionsTransport>,
    ) -> Self {
        Self {
            provider,
            credentials,
            transport,
        }
    }

    /// HTTP client against the provider's default base URL.
    pub fn http(provider: ProviderId, credentials: Arc<CredentialStore>, client: Client) -> Self {
        let transport = HttpChatCompletionsTransport::for_provider(client, provider);
        Self::new(provider, credentials, Arc::new(transport))
    }

    pub fn build_request(
        &self,
        request: CompletionRequest,
        stream: bool,
    ) -> ChatCompletionsRequest {
        ChatCompletionsRequest::from_request(request, stream)
    }

    fn api_key(&self) -> Result<SecretString, ProviderError> {
        let secret = self.credentials.credential(self.provider)?;
        if secret.is_empty() {
            return Err(ProviderError::missing_credential(self.provider));
        }

        Ok(secret)
    }
}

impl std::fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("provider", &self.provider)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl CompletionClient for OpenAiCompatibleClient {
    fn id(&self) -> ProviderId {
        self.provider
    }

    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let api_key = self.api_key()?;
            let wire_request = self.build_request(request, false);

            tracing::debug!(
                phase = "provider",
                event = "request",
                provider = %self.provider,
                model = %wire_request.model,
                stream = false
            );

            self.transport.complete(wire_request, api_key).await
        })
    }

    fn stream_complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<FragmentStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let api_key = self.api_key()?;
            let wire_request = self.build_request(request, true);

            tracing::debug!(
                phase = "provider",
                event = "request",
                provider = %self.provider,
                model = %wire_request.model,
                stream = true
            );

            let body = self.transport.open_stream(wire_request, api_key).await?;
            Ok(decode_fragments(self.provider, body))
        })
    }
}

/// Turns an event-stream body into text fragments. Malformed events are logged
/// and skipped; reading stops at `[DONE]`.
pub(crate) fn decode_fragments<'a>(
    provider: ProviderId,
    mut body: ByteStream<'a>,
) -> FragmentStream<'a> {
    let stream = try_stream! {
        let mut decoder = SseDecoder::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for event in decoder.feed(&chunk) {
                match event {
                    SseEvent::Fragment(text) => {
                        yield text;
                    }
                    SseEvent::Malformed(error) => {
                        tracing::warn!(
                            phase = "provider",
                            event = "malformed_stream_event",
                            provider = %provider,
                            payload = %error.payload,
                            error = %error
                        );
                    }
                    SseEvent::Done => {}
                }
            }

            if decoder.is_finished() {
                break;
            }
        }
    };

    Box::pin(stream)
}
