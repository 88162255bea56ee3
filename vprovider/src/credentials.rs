//! Provider credential lookup over process configuration.
//!
//! ```rust
//! use vprovider::{CredentialStore, ProviderId};
//!
//! let store = CredentialStore::new();
//! assert!(store.credential(ProviderId::Xai).unwrap().is_empty());
//!
//! store.set_api_key(ProviderId::Xai, "xai-test").unwrap();
//! assert_eq!(store.credential(ProviderId::Xai).unwrap().expose(), "xai-test");
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::{ProviderError, ProviderId};

#[derive(Clone, PartialEq, Eq, Default)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes are valid UTF-8.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

/// Resolves provider secrets.
///
/// Explicit keys set through [`CredentialStore::set_api_key`] win; otherwise a
/// store built with [`CredentialStore::from_env`] reads the provider's
/// environment variable at lookup time. An absent secret is returned as an
/// empty [`SecretString`], never as an error.
#[derive(Default)]
pub struct CredentialStore {
    overrides: Mutex<HashMap<ProviderId, SecretString>>,
    read_environment: bool,
}

impl CredentialStore {
    /// A store that only knows explicitly configured keys.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self {
            overrides: Mutex::default(),
            read_environment: true,
        }
    }

    pub fn reads_environment(&self) -> bool {
        self.read_environment
    }

    pub fn set_api_key(
        &self,
        provider: ProviderId,
        api_key: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let api_key = SecretString::new(api_key);
        if api_key.expose().trim().is_empty() {
            return Err(ProviderError::invalid_request("api key must not be empty"));
        }

        self.overrides_mut()?.insert(provider, api_key);
        Ok(())
    }

    pub fn clear(&self, provider: ProviderId) -> Result<bool, ProviderError> {
        Ok(self.overrides_mut()?.remove(&provider).is_some())
    }

    pub fn credential(&self, provider: ProviderId) -> Result<SecretString, ProviderError> {
        if let Some(secret) = self.overrides_mut()?.get(&provider) {
            return Ok(secret.clone());
        }

        if !self.read_environment {
            return Ok(SecretString::default());
        }

        let name = provider.descriptor().credential_env_name;
        Ok(std::env::var(name)
            .map(SecretString::new)
            .unwrap_or_default())
    }

    /// Looks up a credential by provider key such as `"xai"`.
    pub fn credential_for_key(&self, key: &str) -> Result<SecretString, ProviderError> {
        let provider = key.parse::<ProviderId>()?;
        self.credential(provider)
    }

    pub fn has_credential(&self, provider: ProviderId) -> Result<bool, ProviderError> {
        Ok(!self.credential(provider)?.is_empty())
    }

    fn overrides_mut(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ProviderId, SecretString>>, ProviderError> {
        self.overrides
            .lock()
            .map_err(|_| ProviderError::other("credential store lock poisoned"))
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("read_environment", &self.read_environment)
            .finish_non_exhaustive()
    }
}
