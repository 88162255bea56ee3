//! Process configuration for the runtime wiring helpers.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use virtue::{ProviderId, RuntimeConfig};
//!
//! let config = RuntimeConfig::from_lookup(|name| match name {
//!     "VIRTUE_DEFAULT_MODEL" => Some("grok-1".to_string()),
//!     "VIRTUE_XAI_BASE_URL" => Some("http://localhost:9000/v1".to_string()),
//!     _ => None,
//! });
//!
//! assert_eq!(config.default_model, "grok-1");
//! assert_eq!(config.request_timeout, Duration::from_secs(90));
//! assert_eq!(config.base_url(ProviderId::Xai), "http://localhost:9000/v1");
//! assert_eq!(config.base_url(ProviderId::OpenAi), "https://api.openai.com/v1");
//! ```

use std::collections::HashMap;
use std::time::Duration;

use vchat::ChatOptions;
use vprovider::ProviderId;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

pub const DEFAULT_MODEL_VAR: &str = "VIRTUE_DEFAULT_MODEL";
pub const REQUEST_TIMEOUT_VAR: &str = "VIRTUE_REQUEST_TIMEOUT_SECS";
pub const STREAMING_VAR: &str = "VIRTUE_STREAMING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub default_model: String,
    /// Whole-request timeout applied to every provider call.
    pub request_timeout: Duration,
    pub streaming: bool,
    pub base_urls: HashMap<ProviderId, String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            streaming: false,
            base_urls: HashMap::new(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(model) = read(DEFAULT_MODEL_VAR) {
            config.default_model = model;
        }

        if let Some(raw) = read(REQUEST_TIMEOUT_VAR) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    phase = "config",
                    event = "invalid_value",
                    variable = REQUEST_TIMEOUT_VAR,
                    value = %raw,
                    fallback_secs = DEFAULT_REQUEST_TIMEOUT.as_secs()
                ),
            }
        }

        if let Some(raw) = read(STREAMING_VAR) {
            match parse_flag(&raw) {
                Some(streaming) => config.streaming = streaming,
                None => tracing::warn!(
                    phase = "config",
                    event = "invalid_value",
                    variable = STREAMING_VAR,
                    value = %raw
                ),
            }
        }

        for provider in ProviderId::ALL {
            if let Some(url) = read(&base_url_var(provider)) {
                config.base_urls.insert(provider, url);
            }
        }

        config
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn with_base_url(mut self, provider: ProviderId, base_url: impl Into<String>) -> Self {
        self.base_urls.insert(provider, base_url.into());
        self
    }

    pub fn base_url(&self, provider: ProviderId) -> &str {
        self.base_urls
            .get(&provider)
            .map(String::as_str)
            .unwrap_or(provider.descriptor().default_base_url)
    }

    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions::default().with_streaming(self.streaming)
    }
}

/// `VIRTUE_<PROVIDER>_BASE_URL`, e.g. `VIRTUE_XAI_BASE_URL`.
pub fn base_url_var(provider: ProviderId) -> String {
    format!("VIRTUE_{}_BASE_URL", provider.as_str().to_ascii_uppercase())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        RuntimeConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), RuntimeConfig::default());
        assert_eq!(RuntimeConfig::default().default_model, "gpt-4o");
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("VIRTUE_DEFAULT_MODEL", " claude-3-opus "),
            ("VIRTUE_REQUEST_TIMEOUT_SECS", "15"),
            ("VIRTUE_STREAMING", "TRUE"),
            ("VIRTUE_DEEPSEEK_BASE_URL", "http://proxy.local/v1"),
        ]);

        assert_eq!(config.default_model, "claude-3-opus");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert!(config.streaming);
        assert!(config.chat_options().generation.stream);
        assert_eq!(config.base_url(ProviderId::DeepSeek), "http://proxy.local/v1");
        assert_eq!(config.base_url(ProviderId::Kimi), "https://api.moonshot.cn/v1");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("VIRTUE_REQUEST_TIMEOUT_SECS", "soon"),
            ("VIRTUE_STREAMING", "maybe"),
            ("VIRTUE_DEFAULT_MODEL", "   "),
        ]);
        assert_eq!(config, RuntimeConfig::default());

        let zero = config_from(&[("VIRTUE_REQUEST_TIMEOUT_SECS", "0")]);
        assert_eq!(zero.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn base_url_variables_use_upper_case_provider_keys() {
        assert_eq!(base_url_var(ProviderId::Xai), "VIRTUE_XAI_BASE_URL");
        assert_eq!(base_url_var(ProviderId::OpenAi), "VIRTUE_OPENAI_BASE_URL");
    }
}
