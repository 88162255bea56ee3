//! Shared provider error kinds and error value helpers.
//!
//! ```rust
//! use vprovider::{ProviderError, ProviderErrorKind, ProviderId};
//!
//! let missing = ProviderError::missing_credential(ProviderId::Xai);
//! assert_eq!(missing.kind, ProviderErrorKind::MissingCredential);
//! assert!(missing.message.contains("GROK_API_KEY"));
//!
//! let api = ProviderError::api(401, "invalid api key");
//! assert_eq!(api.status, Some(401));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::ProviderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// A provider key that is not in the static provider tables.
    UnknownProvider,
    /// The provider's secret is not configured.
    MissingCredential,
    /// Non-2xx response or a malformed success envelope.
    Api,
    InvalidRequest,
    Timeout,
    Transport,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn unknown_provider(key: impl AsRef<str>) -> Self {
        Self::new(
            ProviderErrorKind::UnknownProvider,
            format!("unknown provider: {}", key.as_ref()),
        )
    }

    pub fn missing_credential(provider: ProviderId) -> Self {
        Self::new(
            ProviderErrorKind::MissingCredential,
            format!(
                "{provider} API key is not set; add {} to the environment",
                provider.descriptor().credential_env_name
            ),
        )
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Api,
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{:?} (status {status}): {}", self.kind, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_only_for_api_errors() {
        let api = ProviderError::api(503, "overloaded");
        assert_eq!(api.to_string(), "Api (status 503): overloaded");

        let timeout = ProviderError::timeout("request timed out");
        assert_eq!(timeout.to_string(), "Timeout: request timed out");
        assert_eq!(timeout.status, None);
    }

    #[test]
    fn unknown_provider_names_the_offending_key() {
        let error = ProviderError::unknown_provider("mistral");
        assert_eq!(error.kind, ProviderErrorKind::UnknownProvider);
        assert_eq!(error.message, "unknown provider: mistral");
    }
}
