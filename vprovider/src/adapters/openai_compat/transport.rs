//! Chat-completions transport trait and reqwest-based HTTP implementation.

use std::pin::Pin;

use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{Client, Response, header};

use crate::{CompletionResponse, ProviderError, ProviderFuture, ProviderId, SecretString};

use super::serde_api::{ChatCompletionsRequest, ChatCompletionsResponse, extract_error_message};

/// Raw response body chunks, in arrival order.
pub type ByteStream<'a> =
    Pin<Box<dyn Stream<Item = Result<Vec<u8>, ProviderError>> + Send + 'a>>;

pub trait ChatCompletionsTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: ChatCompletionsRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>>;

    /// Sends a streaming request and returns the undecoded event-stream body.
    fn open_stream<'a>(
        &'a self,
        request: ChatCompletionsRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<ByteStream<'a>, ProviderError>>;
}

/// `reqwest` transport. The client's request timeout also bounds reading a
/// streamed body, so it caps the total length of a streamed reply.
#[derive(Debug, Clone)]
pub struct HttpChatCompletionsTransport {
    client: Client,
    base_url: String,
}

impl HttpChatCompletionsTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn for_provider(client: Client, provider: ProviderId) -> Self {
        Self::new(client, provider.descriptor().default_base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn send(
        &self,
        request: &ChatCompletionsRequest,
        api_key: &SecretString,
    ) -> Result<Response, ProviderError> {
        let mut builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key.expose())
            .json(request);
        if request.stream {
            builder = builder.header(header::ACCEPT, "text/event-stream");
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        Ok(response)
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()))
        });

        ProviderError::api(status.as_u16(), message)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

impl ChatCompletionsTransport for HttpChatCompletionsTransport {
    fn complete<'a>(
        &'a self,
        request: ChatCompletionsRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>> {
        Box::pin(async move {
            let response = self.send(&request, &api_key).await?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(map_reqwest_error)?;

            ChatCompletionsResponse::parse(status, &body)?.normalize(status, &request.model)
        })
    }

    fn open_stream<'a>(
        &'a self,
        request: ChatCompletionsRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<ByteStream<'a>, ProviderError>> {
        Box::pin(async move {
            let response = self.send(&request, &api_key).await?;
            let body = response
                .bytes_stream()
                .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(map_reqwest_error));

            Ok(Box::pin(body) as ByteStream<'a>)
        })
    }
}
