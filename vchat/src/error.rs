//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use vprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Provider,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    /// Set when the failure came from the provider layer.
    pub provider_kind: Option<ProviderErrorKind>,
    pub status: Option<u16>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider_kind: None,
            status: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Provider, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Store, message)
    }

    pub fn is_provider(&self, kind: ProviderErrorKind) -> bool {
        self.provider_kind == Some(kind)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.provider_kind {
            Some(provider_kind) => {
                write!(f, "{:?}/{:?}: {}", self.kind, provider_kind, self.message)
            }
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        Self {
            kind: ChatErrorKind::Provider,
            message: value.message,
            provider_kind: Some(value.kind),
            status: value.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vprovider::ProviderId;

    #[test]
    fn provider_errors_keep_their_classification() {
        let error = ChatError::from(ProviderError::api(429, "slow down"));

        assert_eq!(error.kind, ChatErrorKind::Provider);
        assert!(error.is_provider(ProviderErrorKind::Api));
        assert_eq!(error.status, Some(429));
        assert_eq!(error.to_string(), "Provider/Api: slow down");

        let missing = ChatError::from(ProviderError::missing_credential(ProviderId::Xai));
        assert!(missing.is_provider(ProviderErrorKind::MissingCredential));
    }

    #[test]
    fn local_errors_have_no_provider_kind() {
        let error = ChatError::store("disk full");
        assert_eq!(error.provider_kind, None);
        assert_eq!(error.to_string(), "Store: disk full");
    }
}
