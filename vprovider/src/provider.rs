use vcommon::BoxFuture;

use crate::{CompletionRequest, CompletionResponse, FragmentStream, ProviderError, ProviderId};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

/// Capability shared by every provider's completion client.
pub trait CompletionClient: Send + Sync {
    fn id(&self) -> ProviderId;

    /// One buffered round trip returning the normalized response.
    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<CompletionResponse, ProviderError>>;

    /// Opens a streaming completion. Dropping the returned stream releases the
    /// underlying connection.
    fn stream_complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<FragmentStream<'a>, ProviderError>>;
}
